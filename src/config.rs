//! Configuration read from the environment.

use std::time::Duration;

use crate::{ConfigError, DeliveryOptions};

/// Default billing endpoint, used when none is given on the command line.
pub const API_URL: &str = "API_URL";
/// Timeout of the delivery request, in seconds.
pub const HTTP_TIMEOUT: &str = "BILLING_HTTP_TIMEOUT_SECS";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Read the configuration from the process environment, after loading any `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing `.env` file is fine, the environment may be set some other way
        let _ = dotenv::dotenv();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let api_url = lookup(API_URL).filter(|url| !url.trim().is_empty());
        let timeout = match lookup(HTTP_TIMEOUT) {
            None => None,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: HTTP_TIMEOUT,
                        value,
                    })
                }
            },
        };
        Ok(Self { api_url, timeout })
    }

    pub fn delivery_options(&self) -> DeliveryOptions {
        DeliveryOptions {
            timeout: self.timeout,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        Config::from_vars(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn empty_environment() {
        assert_eq!(config(&[]), Ok(Config::default()));
    }

    #[test]
    fn all_variables() {
        let config = config(&[
            (API_URL, "https://billing.test/bills"),
            (HTTP_TIMEOUT, "10"),
        ])
        .unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://billing.test/bills"));
        assert_eq!(config.delivery_options().timeout, Some(Duration::from_secs(10)));
        assert!(config.delivery_options().headers.is_empty());
    }

    #[test]
    fn blank_url_is_unset() {
        assert_eq!(config(&[(API_URL, "  ")]).unwrap().api_url, None);
    }

    #[test]
    fn invalid_timeout() {
        for value in ["0", "-1", "soon"] {
            assert_eq!(
                config(&[(HTTP_TIMEOUT, value)]),
                Err(ConfigError::InvalidTimeout {
                    name: HTTP_TIMEOUT,
                    value: value.to_string(),
                })
            );
        }
    }
}
