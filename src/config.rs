//! Application configuration
//!
//! The client has a single external setting: the base URL of the Samarth
//! query backend. It can be overridden with the `SAMARTH_API_URL`
//! environment variable.

/// Default backend address for local development
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variable that overrides the backend address
pub const API_URL_ENV: &str = "SAMARTH_API_URL";

/// Configuration for the Samarth client
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the query backend (no trailing slash)
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let api_base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Self::default().with_api_base_url(api_base_url)
    }

    /// Set the backend base URL, trimming any trailing slash
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api_base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Full URL of the query endpoint
    pub fn query_url(&self) -> String {
        format!("{}/api/query", self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:5000");
        assert_eq!(config.query_url(), "http://127.0.0.1:5000/api/query");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = AppConfig::default().with_api_base_url("http://example.com/");
        assert_eq!(config.query_url(), "http://example.com/api/query");
    }
}
