//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path to the SQLite database file
    pub database_path: String,
    /// Maximum requests per caller per rate-limit window
    pub rate_limit_max_requests: u32,
    /// Rate-limit window duration in seconds
    pub rate_limit_window_secs: u64,
    /// Cache entries older than this many days are evicted
    pub cache_retention_days: u32,
    /// Background retention sweep interval in seconds
    pub cleanup_interval_secs: u64,
    /// API key for the external translation provider (empty = demo provider)
    pub provider_api_key: String,
    /// Base URL of the translation provider API
    pub provider_base_url: String,
    /// Model requested from the translation provider
    pub provider_model: String,
    /// Timeout for a single provider call in seconds
    pub provider_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite file path (default: lingua-cache.db)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 60)
    /// - `RATE_LIMIT_WINDOW_SECS` - Window duration in seconds (default: 60)
    /// - `CACHE_RETENTION_DAYS` - Cache entry retention in days (default: 30)
    /// - `CLEANUP_INTERVAL_SECS` - Retention sweep frequency (default: 3600)
    /// - `OPENAI_API_KEY` - Provider API key (default: empty, demo provider)
    /// - `OPENAI_BASE_URL` - Provider base URL (default: https://api.openai.com/v1)
    /// - `OPENAI_MODEL` - Provider model (default: gpt-3.5-turbo)
    /// - `PROVIDER_TIMEOUT_SECS` - Provider call timeout (default: 30)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "lingua-cache.db".to_string()),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            cache_retention_days: env::var("CACHE_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            cleanup_interval_secs: env::var("CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            provider_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            provider_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            provider_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_path: "lingua-cache.db".to_string(),
            rate_limit_max_requests: 60,
            rate_limit_window_secs: 60,
            cache_retention_days: 30,
            cleanup_interval_secs: 3600,
            provider_api_key: String::new(),
            provider_base_url: "https://api.openai.com/v1".to_string(),
            provider_model: "gpt-3.5-turbo".to_string(),
            provider_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.rate_limit_max_requests, 60);
        assert_eq!(config.rate_limit_window_secs, 60);
        assert_eq!(config.cache_retention_days, 30);
        assert_eq!(config.provider_model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("DATABASE_PATH");
        env::remove_var("RATE_LIMIT_MAX_REQUESTS");
        env::remove_var("RATE_LIMIT_WINDOW_SECS");
        env::remove_var("CACHE_RETENTION_DAYS");
        env::remove_var("CLEANUP_INTERVAL_SECS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_path, "lingua-cache.db");
        assert_eq!(config.rate_limit_max_requests, 60);
        assert_eq!(config.cache_retention_days, 30);
    }
}
