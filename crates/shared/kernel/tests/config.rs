use gems_kernel::config::{ConfigError, load_config};
use gems_kernel::domain::config::ApiConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_sections_from_toml_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("gems.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8123

[assessment]
default_time_limit_minutes = 45

[games]
word_guesser_max_attempts = 5
"#,
    )?;

    let cfg: ApiConfig = load_config(Some(&path))?;
    assert_eq!(cfg.server.port, 8123);
    assert_eq!(cfg.assessment.default_time_limit_minutes, 45);
    assert_eq!(cfg.games.word_guesser_max_attempts, 5);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.comprehension.passing_score, 60);
    Ok(())
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");

    let err = load_config::<ApiConfig>(Some(&missing)).expect_err("file is required");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"));
}
