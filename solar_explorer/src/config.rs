//! Environment parsing and defaults for the server connection.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::data::ServerConfig;

pub const SERVER_URL_VAR: &str = "SOLAR_SERVER_URL";
pub const TIMEOUT_VAR: &str = "SOLAR_REQUEST_TIMEOUT_SECS";

const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value:?} ({reason})")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid timeout in {var}: {value:?} (expected whole seconds > 0)")]
    InvalidTimeout { var: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Reads the server config from the environment. Unset variables take the
/// default; invalid ones are reported and also take the default.
pub fn server_config() -> ServerConfig {
    let mut config = ServerConfig::default();

    if let Ok(raw) = std::env::var(SERVER_URL_VAR) {
        match parse_server_url(&raw) {
            Ok(url) => config.base_url = url,
            Err(err) => eprintln!("orrery: {err}; using {DEFAULT_SERVER_URL}"),
        }
    }
    if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
        match parse_timeout(&raw) {
            Ok(timeout) => config.request_timeout = timeout,
            Err(err) => eprintln!("orrery: {err}; using {DEFAULT_TIMEOUT_SECS}s"),
        }
    }

    config
}

pub fn parse_server_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        var: SERVER_URL_VAR,
        value: raw.to_string(),
        reason,
    };
    let url = raw.trim().parse::<Url>().map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var: TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}

fn default_url() -> Url {
    Url::parse(DEFAULT_SERVER_URL).unwrap_or_else(|err| {
        panic!("orrery: invalid built-in server URL {DEFAULT_SERVER_URL:?}: {err}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
    }

    struct EnvGuard {
        snapshot: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn capture(keys: &[&'static str]) -> Self {
            let snapshot = keys
                .iter()
                .map(|&key| (key, std::env::var(key).ok()))
                .collect();
            Self { snapshot }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.snapshot {
                match value {
                    Some(val) => std::env::set_var(key, val),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    const ENV_KEYS: [&str; 2] = [SERVER_URL_VAR, TIMEOUT_VAR];

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::remove_var(SERVER_URL_VAR);
        std::env::remove_var(TIMEOUT_VAR);

        let config = server_config();

        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn env_overrides_url_and_timeout() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::set_var(SERVER_URL_VAR, "http://10.0.0.5:8080/solar/");
        std::env::set_var(TIMEOUT_VAR, "3");

        let config = server_config();

        assert_eq!(config.base_url.as_str(), "http://10.0.0.5:8080/solar/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let _lock = lock_env();
        let _guard = EnvGuard::capture(&ENV_KEYS);
        std::env::set_var(SERVER_URL_VAR, "not-a-url");
        std::env::set_var(TIMEOUT_VAR, "0");

        let config = server_config();

        assert_eq!(config.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = parse_server_url("ftp://example.com").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
        assert!(err.to_string().contains(SERVER_URL_VAR));
    }

    #[test]
    fn timeout_must_be_whole_seconds() {
        assert_eq!(parse_timeout(" 15 "), Ok(Duration::from_secs(15)));
        assert!(parse_timeout("1.5").is_err());
        assert!(parse_timeout("-2").is_err());
    }
}
