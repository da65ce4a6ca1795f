//! Client configuration.

use std::env;
use std::fmt;

use crate::error::TransportError;

/// Hosted service root; endpoint paths are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

pub const API_KEY_ENV: &str = "NEWSAPI_KEY";
pub const BASE_URL_ENV: &str = "NEWSAPI_BASE_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at another root; a trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read `NEWSAPI_KEY` and, if set, `NEWSAPI_BASE_URL`.
    pub fn from_env() -> Result<Self, TransportError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(TransportError::MissingApiKey)?;
        let config = Self::new(api_key);
        Ok(match env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => config.with_base_url(&url),
            _ => config,
        })
    }
}

// The key stays out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_hosted_service() {
        let config = ClientConfig::new("k");
        assert_eq!(config.base_url, "https://newsapi.org/v2");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("k").with_base_url("http://localhost:3000/v2/");
        assert_eq!(config.base_url, "http://localhost:3000/v2");
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
    }
}
