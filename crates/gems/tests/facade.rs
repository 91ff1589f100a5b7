use gems::domain::config::ApiConfig;
use gems_event_bus::EventBus;

#[test]
fn every_stateful_slice_is_initialized() {
    let slices = gems::init(&ApiConfig::default(), &EventBus::new()).unwrap();
    assert_eq!(slices.len(), 3);
    assert!(gems::features::is_enabled("games"));
    assert!(!gems::features::is_enabled("licensing"));
}

#[test]
fn invalid_settings_stop_the_bootstrap() {
    let mut config = ApiConfig::default();
    config.games.max_sessions = 0;
    assert!(gems::init(&config, &EventBus::new()).is_err());
}
