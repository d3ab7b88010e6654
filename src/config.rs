//! Runtime configuration read from the environment (and `.env` via dotenv)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::ThemeMode;
use crate::services::history_service::DEFAULT_TREND_WINDOW;
use crate::utils::errors::ConfigError;
use crate::utils::retry::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_THEME_STORE: &str = "fraud_guardian_prefs.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub retry: RetryPolicy,
    pub trend_window: usize,
    pub theme_store_path: PathBuf,
    pub system_theme: ThemeMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(5),
            retry: RetryPolicy::none(),
            trend_window: DEFAULT_TREND_WINDOW,
            theme_store_path: PathBuf::from(DEFAULT_THEME_STORE),
            system_theme: ThemeMode::Light,
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let base_url = lookup("FRAUD_GUARDIAN_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;
        let ttl_secs: u64 = parse_or(&lookup, "CACHE_TTL_SECS", defaults.cache_ttl.as_secs())?;
        let max_attempts: u32 = parse_or(&lookup, "RETRY_MAX_ATTEMPTS", 1)?;
        let backoff_ms: u64 = parse_or(&lookup, "RETRY_BACKOFF_MS", 250)?;
        let trend_window: usize = parse_or(&lookup, "TREND_WINDOW", defaults.trend_window)?;

        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if trend_window == 0 {
            return Err(ConfigError::Invalid {
                key: "TREND_WINDOW",
                value: "0".to_string(),
            });
        }

        let theme_store_path = lookup("THEME_STORE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.theme_store_path);

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            cache_ttl: Duration::from_secs(ttl_secs),
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(backoff_ms)),
            trend_window,
            theme_store_path,
            system_theme: ThemeMode::from_system_hint(lookup("SYSTEM_COLOR_SCHEME").as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.trend_window, 10);
        assert_eq!(config.theme_store_path, PathBuf::from("fraud_guardian_prefs.json"));
        assert_eq!(config.system_theme, ThemeMode::Light);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FRAUD_GUARDIAN_URL", "http://10.0.2.2:5000/"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("CACHE_TTL_SECS", "0"),
            ("RETRY_MAX_ATTEMPTS", "4"),
            ("RETRY_BACKOFF_MS", "100"),
            ("TREND_WINDOW", "20"),
            ("THEME_STORE_PATH", "/tmp/prefs.json"),
            ("SYSTEM_COLOR_SCHEME", "dark"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://10.0.2.2:5000/");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.retry, RetryPolicy::new(4, Duration::from_millis(100)));
        assert_eq!(config.trend_window, 20);
        assert_eq!(config.theme_store_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.system_theme, ThemeMode::Dark);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("CACHE_TTL_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "CACHE_TTL_SECS",
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(AppConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("TREND_WINDOW", "0")])).is_err());
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("FRAUD_GUARDIAN_URL", "  "), ("TREND_WINDOW", "")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.trend_window, DEFAULT_TREND_WINDOW);
    }
}
