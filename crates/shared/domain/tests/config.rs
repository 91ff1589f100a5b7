use gems_domain::config::{ApiConfig, AssessmentConfig, GamesConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4000);
    assert!(server.ssl.is_none());

    let assessment = AssessmentConfig::default();
    assert_eq!(assessment.default_time_limit_minutes, 60);

    let games = GamesConfig::default();
    assert_eq!(games.word_guesser_max_attempts, 6);

    let cfg = ApiConfig::default();
    assert_eq!(cfg.comprehension.passing_score, 60);
    assert_eq!(cfg.comprehension.default_time_limit_minutes, 30);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "games": { "word_guesser_max_attempts": 8 },
        "logging": { "json": true, "directory": "/tmp/logs" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.games.word_guesser_max_attempts, 8);
    assert_eq!(cfg.games.max_sessions, 10_000);
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.directory.as_deref(), Some(std::path::Path::new("/tmp/logs")));
}

#[test]
fn deref_mut_clones_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 4000);
    assert_eq!(changed.server.port, 9000);
}
