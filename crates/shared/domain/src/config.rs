use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub assessment: AssessmentConfig,
    pub comprehension: ComprehensionConfig,
    pub games: GamesConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Log output settings. `RUST_LOG` still wins over `level` when set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub directory: Option<PathBuf>,
    pub env_filter: Option<String>,
}

/// Timed assessment attempts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Used when a paper does not carry its own time limit.
    pub default_time_limit_minutes: u32,
    /// Attempts untouched for this long are evicted.
    pub attempt_idle_minutes: u64,
    pub max_attempts: u64,
}

/// Reading-comprehension defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComprehensionConfig {
    pub default_time_limit_minutes: u32,
    /// Percentage needed to pass.
    pub passing_score: u8,
}

/// Mini-game sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    pub session_idle_minutes: u64,
    pub max_sessions: u64,
    pub word_guesser_max_attempts: u8,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), json: false, directory: None, env_filter: None }
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self { default_time_limit_minutes: 60, attempt_idle_minutes: 180, max_attempts: 10_000 }
    }
}

impl Default for ComprehensionConfig {
    fn default() -> Self {
        Self { default_time_limit_minutes: 30, passing_score: 60 }
    }
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self { session_idle_minutes: 60, max_sessions: 10_000, word_guesser_max_attempts: 6 }
    }
}
