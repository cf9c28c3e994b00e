//! Configuration management for shelfsync

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::services::unit_cache::CachePolicy;

/// Fallback API root used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://05.hackathon.ethz.ch/api";

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheConfig {
    /// Lifetime of a settled shelf-unit entry. Unset keeps entries forever.
    pub ttl_seconds: Option<u64>,
    /// Delay after which a failed lookup may be retried. Unset caches failures forever.
    pub failure_retry_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from defaults, optional files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_BASE_URL)?
            .set_default("api.timeout_seconds", 30i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SHELFSYNC_API__BASE_URL, SHELFSYNC_CACHE__TTL_SECONDS, ...
            .add_source(
                Environment::with_prefix("SHELFSYNC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("SHELF_API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Per-request timeout for the HTTP transport
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    /// Eviction policy for the shelf-unit lookup cache
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: self.cache.ttl_seconds.map(Duration::from_secs),
            failure_retry_after: self.cache.failure_retry_seconds.map(Duration::from_secs),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
