use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

use crate::error::ConfigError;

const HOSTNAME_PATH: &str = "/etc/hostname";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub option_a: String,
    pub option_b: String,
    pub redis_host: String,
    pub redis_port: u16,
    pub cookie_secure: bool,
    pub hostname: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: try_load(&lookup, "PORT", "8080")?,
            option_a: try_load(&lookup, "OPTION_A", "Cats")?,
            option_b: try_load(&lookup, "OPTION_B", "Dogs")?,
            redis_host: try_load(&lookup, "REDIS_HOST", "redis")?,
            redis_port: try_load(&lookup, "REDIS_PORT", "6379")?,
            cookie_secure: try_load(&lookup, "COOKIE_SECURE", "false")?,
            hostname: lookup("HOSTNAME").unwrap_or_else(read_hostname),
        })
    }

    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/0", self.redis_host, self.redis_port)
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");

            Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

fn read_hostname() -> String {
    read_to_string(HOSTNAME_PATH)
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            warn!("Failed to read hostname from {HOSTNAME_PATH}, using unknown");
            "unknown".to_string()
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Config;
    use crate::error::ConfigError;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("HOSTNAME", "web-1")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.option_a, "Cats");
        assert_eq!(config.option_b, "Dogs");
        assert_eq!(config.redis_host, "redis");
        assert_eq!(config.redis_port, 6379);
        assert!(!config.cookie_secure);
        assert_eq!(config.hostname, "web-1");
        assert_eq!(config.redis_url(), "redis://redis:6379/0");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPTION_A", "Tabs"),
            ("OPTION_B", "Spaces"),
            ("REDIS_HOST", "queue.local"),
            ("REDIS_PORT", "6380"),
            ("COOKIE_SECURE", "true"),
        ])
        .unwrap();

        assert_eq!(config.option_a, "Tabs");
        assert_eq!(config.option_b, "Spaces");
        assert!(config.cookie_secure);
        assert_eq!(config.redis_url(), "redis://queue.local:6380/0");
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("REDIS_PORT", "abc")]).unwrap_err();

        match err {
            ConfigError::Invalid { key, value, .. } => {
                assert_eq!(key, "REDIS_PORT");
                assert_eq!(value, "abc");
            }
        }
    }

    #[test]
    fn test_hostname_fallback_is_never_empty() {
        let config = config_from(&[]).unwrap();

        assert!(!config.hostname.is_empty());
    }
}
