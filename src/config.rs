//! Credential and upstream configuration, loaded once at startup

use std::fmt;
use std::time::Duration;

use crate::types::{CoinMarketError, Result};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "COINMARKET_API_KEY";
/// Environment variable overriding the upstream base URL
pub const BASE_URL_VAR: &str = "COINMARKET_BASE_URL";
/// Environment variable setting an HTTP timeout in milliseconds
pub const TIMEOUT_MS_VAR: &str = "COINMARKET_TIMEOUT_MS";

/// Default upstream host
pub const DEFAULT_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Immutable configuration passed into the upstream client
#[derive(Clone)]
pub struct CredentialConfig {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CredentialConfig {
    /// Create a config with the given API key and default upstream
    ///
    /// Fails when the key is empty or whitespace.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(missing_key());
        }
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        })
    }

    /// Load from the process environment (after `.env`, if the caller loaded one)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or_else(missing_key)?;
        let mut config = Self::new(api_key)?;

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(raw) = lookup(TIMEOUT_MS_VAR).filter(|v| !v.trim().is_empty()) {
            let ms = raw.trim().parse::<u64>().map_err(|e| {
                CoinMarketError::Config(format!("Invalid {TIMEOUT_MS_VAR} value '{raw}': {e}"))
            })?;
            config = config.with_timeout_ms(ms);
        }

        Ok(config)
    }

    /// Builder: set the upstream base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set the HTTP timeout
    pub fn with_timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout = Some(Duration::from_millis(timeout));
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn missing_key() -> CoinMarketError {
    CoinMarketError::Config(format!("Missing {API_KEY_VAR} environment variable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_fails() {
        let err = CredentialConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, CoinMarketError::Config(_)));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn test_blank_key_fails() {
        let err = CredentialConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, CoinMarketError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = CredentialConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc")])).unwrap();
        assert_eq!(config.api_key(), "abc");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CredentialConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "abc"),
            (BASE_URL_VAR, "http://localhost:9000/"),
            (TIMEOUT_MS_VAR, "2500"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_bad_timeout() {
        let err = CredentialConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "abc"),
            (TIMEOUT_MS_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_MS_VAR));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = CredentialConfig::new("super-secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
