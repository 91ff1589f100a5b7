use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GEMS_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config";

#[gems_derive::gems_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered under `GEMS__*` environment overrides.
///
/// 1. **File**: an explicit `path` is required to exist. Without one, `$GEMS_CONFIG` is used
///    when set (also required), otherwise an optional `config.{toml,json,yaml}` in the working
///    directory.
/// 2. **Environment**: `GEMS__SECTION__KEY` overrides `section.key`
///    (e.g. `GEMS__SERVER__PORT=8080`).
///
/// Every missing key falls back to the target type's `serde` defaults.
///
/// # Errors
/// Returns [`ConfigError::Config`] when a required file is missing or the merged values
/// do not deserialize into `T`.
///
/// # Example
/// ```rust
/// use gems_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let (source, required) = match path {
        Some(p) => (p.as_ref().to_path_buf(), true),
        None => std::env::var_os(CONFIG_PATH_ENV)
            .map_or_else(|| (PathBuf::from(DEFAULT_CONFIG_FILE), false), |p| (PathBuf::from(p), true)),
    };

    info!(path = %source.display(), required, "Loading configuration");

    Config::builder()
        .add_source(File::from(source.as_path()).required(required))
        .add_source(
            Environment::with_prefix("GEMS")
                .separator("__")
                .try_parsing(true)
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
