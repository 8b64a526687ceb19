use std::env;

pub const BASE_URL_ENV: &str = "NANOLINK_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Service configuration.
///
/// The only external parameter is the public base URL used to render
/// full short links, supplied by the environment at process start.
#[derive(Debug, Clone)]
pub struct ShortenerConfig {
    pub base_url: String,
}

impl ShortenerConfig {
    /// Creates a configuration with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads the configuration from the environment, falling back to
    /// [`DEFAULT_BASE_URL`] when `NANOLINK_BASE_URL` is unset.
    pub fn from_env() -> Self {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
