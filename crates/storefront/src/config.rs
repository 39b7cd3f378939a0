//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults target a local backend.
//!
//! - `VOLTPEAK_API_URL` - Base URL of the product/order service
//!   (default: `http://localhost:3001`)
//! - `VOLTPEAK_DATA_DIR` - Directory for durable shopper state
//!   (default: `.voltpeak`)
//! - `VOLTPEAK_SEARCH_DEBOUNCE_MS` - Quiet window before a catalog query is
//!   issued (default: 300)
//! - `VOLTPEAK_CHECKOUT_MIN_MS` - Minimum visible checkout processing
//!   duration (default: 2500)
//! - `VOLTPEAK_REQUEST_TIMEOUT_MS` - Per-request HTTP timeout
//!   (default: 10000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";
/// Default durable data directory.
pub const DEFAULT_DATA_DIR: &str = ".voltpeak";
/// Default search debounce quiet window, in milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
/// Default minimum visible checkout duration, in milliseconds.
pub const DEFAULT_CHECKOUT_MIN_MS: u64 = 2500;
/// Default HTTP request timeout, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the product/order service.
    pub api_base_url: Url,
    /// Directory holding the durable local store.
    pub data_dir: PathBuf,
    /// Quiet window before a catalog query is issued.
    pub search_debounce: Duration,
    /// Minimum visible checkout processing duration.
    pub checkout_min_visible: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("VOLTPEAK_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLTPEAK_API_URL".to_owned(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("VOLTPEAK_DATA_DIR", DEFAULT_DATA_DIR));
        let search_debounce =
            get_duration_ms("VOLTPEAK_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS)?;
        let checkout_min_visible =
            get_duration_ms("VOLTPEAK_CHECKOUT_MIN_MS", DEFAULT_CHECKOUT_MIN_MS)?;
        let request_timeout =
            get_duration_ms("VOLTPEAK_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?;

        Ok(Self {
            api_base_url,
            data_dir,
            search_debounce,
            checkout_min_visible,
            request_timeout,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            // The default URL is a constant and always parses.
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            checkout_min_visible: Duration::from_millis(DEFAULT_CHECKOUT_MIN_MS),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a millisecond duration from the environment.
fn get_duration_ms(key: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.checkout_min_visible, Duration::from_millis(2500));
    }

    #[test]
    fn test_get_duration_ms_default() {
        let d = get_duration_ms("VOLTPEAK_TEST_UNSET_DURATION", 42).unwrap();
        assert_eq!(d, Duration::from_millis(42));
    }
}
