use std::env;
use std::fmt;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Clone)]
pub struct Config {
    pub channel_secret: String,
    pub channel_access_token: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingEnv(key))
        };

        let channel_access_token = required("LINE_CHANNEL_ACCESS_TOKEN")?;
        let channel_secret = required("LINE_CHANNEL_SECRET")?;

        let port = match lookup("PORT").filter(|value| !value.is_empty()) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            channel_secret,
            channel_access_token,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("channel_secret", &"<redacted>")
            .field("channel_access_token", &"<redacted>")
            .field("port", &self.port)
            .finish()
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
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_port_to_3000() {
        let config = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
        ]))
        .unwrap();

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_empty_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("PORT", ""),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_reads_port() {
        let config = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[("LINE_CHANNEL_ACCESS_TOKEN", "token")]))
            .unwrap_err();

        assert!(matches!(err, Error::MissingEnv("LINE_CHANNEL_SECRET")));
    }

    #[test]
    fn test_empty_access_token_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", ""),
        ]))
        .unwrap_err();

        assert!(matches!(err, Error::MissingEnv("LINE_CHANNEL_ACCESS_TOKEN")));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
            ("PORT", "http"),
        ]))
        .unwrap_err();

        assert!(matches!(err, Error::InvalidPort(ref p) if p == "http"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::from_lookup(lookup(&[
            ("LINE_CHANNEL_SECRET", "super-secret"),
            ("LINE_CHANNEL_ACCESS_TOKEN", "bearer-token"),
        ]))
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("bearer-token"));
    }
}
