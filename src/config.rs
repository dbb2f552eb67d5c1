use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60 * 60; // 1 hour
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;
pub const DEFAULT_ITUNES_BASE_URL: &str = "https://itunes.apple.com";
pub const DEFAULT_ITUNES_SEARCH_LIMIT: u32 = 200;
pub const DEFAULT_ITUNES_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cache_ttl_seconds: u64,
    pub cache_max_entries: u64,
    pub upstream_base_url: String,
    pub upstream_limit: u32,
    pub upstream_timeout_seconds: u64,
}

impl Config {
    /// Reads the configuration from the environment, falling back to defaults
    /// for unset variables. A `.env` file in the working directory is honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port)?,
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?,
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries)?,
            upstream_base_url: std::env::var("ITUNES_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.upstream_base_url),
            upstream_limit: env_or("ITUNES_SEARCH_LIMIT", defaults.upstream_limit)?,
            upstream_timeout_seconds: env_or(
                "ITUNES_TIMEOUT_SECONDS",
                defaults.upstream_timeout_seconds,
            )?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            upstream_base_url: DEFAULT_ITUNES_BASE_URL.to_string(),
            upstream_limit: DEFAULT_ITUNES_SEARCH_LIMIT,
            upstream_timeout_seconds: DEFAULT_ITUNES_TIMEOUT_SECONDS,
        }
    }
}

fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => parse_value(var, &value),
        Err(_) => Ok(default),
    }
}

pub fn parse_value<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        })
}
