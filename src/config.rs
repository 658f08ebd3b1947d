use crate::error::{AppError, Result};

pub const DEFAULT_API_PORT: u16 = 3000;

/// Leg cap enforced at the HTTP boundary. The engine itself has none.
pub const DEFAULT_MAX_LEGS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    /// "json" for structured output, anything else for plain text (LOG_FORMAT)
    pub log_format: String,
    pub bind_host: String,
    pub api_port: u16,
    /// Maximum legs accepted per request (MAX_LEGS)
    pub max_legs: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_legs = match lookup("MAX_LEGS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| AppError::Config("MAX_LEGS must be a positive integer".to_string()))?,
            None => DEFAULT_MAX_LEGS,
        };

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".to_string()),
            bind_host: lookup("BIND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: match lookup("API_PORT") {
                Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    AppError::Config("API_PORT must be a valid port number".to_string())
                })?,
                None => DEFAULT_API_PORT,
            },
            max_legs,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.api_port)
    }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, "pretty");
        assert_eq!(cfg.api_port, DEFAULT_API_PORT);
        assert_eq!(cfg.max_legs, DEFAULT_MAX_LEGS);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "json"),
            ("BIND_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("MAX_LEGS", "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, "json");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.max_legs, 12);
    }

    #[test]
    fn bad_port_is_config_error() {
        let err = Config::from_lookup(lookup(&[("API_PORT", "99999")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn zero_max_legs_is_config_error() {
        let err = Config::from_lookup(lookup(&[("MAX_LEGS", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
