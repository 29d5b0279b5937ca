use std::time::Duration;

use crate::ConfigError;

/// Public WWLLN feed of recent strikes.
pub const DEFAULT_FEED_URL: &str = "http://wwlln.net/new/map/data/current.json";

/// Shortest refresh interval the client will honour. The feed is a free,
/// unauthenticated service.
pub const MIN_CACHE_SECONDS: u64 = 60;

pub const DEFAULT_RETRY_DELAY_MS: u64 = 3_000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "wwlln-rs/0.1";

/// Settings for a strike client.
///
/// The cache TTL and the retry delay are independent knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub feed_url: String,
    cache_seconds: u64,
    pub retry_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            cache_seconds: MIN_CACHE_SECONDS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Sets the cache TTL, raising it to [`MIN_CACHE_SECONDS`] (with a
    /// warning) when `seconds` is below the floor.
    #[must_use]
    pub fn with_cache_seconds(mut self, seconds: u64) -> Self {
        if seconds < MIN_CACHE_SECONDS {
            tracing::warn!(
                requested = seconds,
                applied = MIN_CACHE_SECONDS,
                "Setting cache timeout to lowest allowed"
            );
            self.cache_seconds = MIN_CACHE_SECONDS;
        } else {
            self.cache_seconds = seconds;
        }
        self
    }

    #[must_use]
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn cache_seconds(&self) -> u64 {
        self.cache_seconds
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_seconds)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable cannot be parsed.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from variables already in the process, without
/// touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric variable cannot be parsed.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Core parsing logic, decoupled from the real environment so tests can feed
/// a plain map.
fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let defaults = ClientConfig::default();
    let feed_url = lookup("WWLLN_FEED_URL").unwrap_or(defaults.feed_url);
    let user_agent = lookup("WWLLN_USER_AGENT").unwrap_or(defaults.user_agent);
    let cache_seconds = parse_u64("WWLLN_CACHE_SECONDS", MIN_CACHE_SECONDS)?;
    let retry_delay_ms = parse_u64("WWLLN_RETRY_DELAY_MS", DEFAULT_RETRY_DELAY_MS)?;
    let request_timeout_secs =
        parse_u64("WWLLN_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

    Ok(ClientConfig {
        feed_url,
        retry_delay_ms,
        request_timeout_secs,
        user_agent,
        ..ClientConfig::default()
    }
    .with_cache_seconds(cache_seconds))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
