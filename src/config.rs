//! Runtime configuration, read from the environment.

use crate::notice::Notice;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STORE_PATH: &str = "coffee-cart.json";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Notice for ConfigError {
    fn notice(&self) -> String {
        self.to_string()
    }
}

/// Which backend answers API calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportMode {
    /// Auth served from the local store; orders always take the fallback path.
    #[default]
    Mock,
    Http,
}

impl FromStr for TransportMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(TransportMode::Mock),
            "http" => Ok(TransportMode::Http),
            _ => Err(()),
        }
    }
}

/// Shop configuration.
///
/// | Variable | Default |
/// |----------|---------|
/// | `COFFEE_API_BASE_URL` | `http://localhost:3000` |
/// | `COFFEE_TRANSPORT` | `mock` (`mock` or `http`) |
/// | `COFFEE_STORE_PATH` | `coffee-cart.json`; empty keeps everything in memory |
/// | `COFFEE_REQUEST_TIMEOUT_MS` | `10000` |
/// | `COFFEE_CLEAR_CART_ON_FALLBACK` | `true` |
#[derive(Debug, Clone, PartialEq)]
pub struct ShopConfig {
    pub api_base_url: String,
    pub transport: TransportMode,
    /// `None` selects an in-memory store.
    pub store_path: Option<PathBuf>,
    pub request_timeout: Duration,
    pub clear_cart_on_fallback: bool,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            transport: TransportMode::Mock,
            store_path: Some(PathBuf::from(DEFAULT_STORE_PATH)),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            clear_cart_on_fallback: true,
        }
    }
}

impl ShopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let transport = match lookup("COFFEE_TRANSPORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "COFFEE_TRANSPORT",
                value,
                expected: "mock or http",
            })?,
            None => defaults.transport,
        };

        let request_timeout = match lookup("COFFEE_REQUEST_TIMEOUT_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    var: "COFFEE_REQUEST_TIMEOUT_MS",
                    value,
                    expected: "milliseconds",
                })?,
            None => defaults.request_timeout,
        };

        let clear_cart_on_fallback = match lookup("COFFEE_CLEAR_CART_ON_FALLBACK") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidValue {
                var: "COFFEE_CLEAR_CART_ON_FALLBACK",
                value,
                expected: "true or false",
            })?,
            None => defaults.clear_cart_on_fallback,
        };

        let store_path = match lookup("COFFEE_STORE_PATH") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => defaults.store_path,
        };

        Ok(Self {
            api_base_url: lookup("COFFEE_API_BASE_URL").unwrap_or(defaults.api_base_url),
            transport,
            store_path,
            request_timeout,
            clear_cart_on_fallback,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShopConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("COFFEE_TRANSPORT", "HTTP"),
            ("COFFEE_API_BASE_URL", "https://shop.example"),
            ("COFFEE_STORE_PATH", ""),
            ("COFFEE_REQUEST_TIMEOUT_MS", "2500"),
            ("COFFEE_CLEAR_CART_ON_FALLBACK", "no"),
        ]))
        .unwrap();

        assert_eq!(config.transport, TransportMode::Http);
        assert_eq!(config.api_base_url, "https://shop.example");
        assert_eq!(config.store_path, None);
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert!(!config.clear_cart_on_fallback);
    }

    #[test]
    fn test_invalid_values() {
        let err = ShopConfig::from_lookup(lookup(&[("COFFEE_TRANSPORT", "carrier-pigeon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "COFFEE_TRANSPORT", .. }));

        let err = ShopConfig::from_lookup(lookup(&[("COFFEE_REQUEST_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "COFFEE_REQUEST_TIMEOUT_MS", .. }));
    }
}
