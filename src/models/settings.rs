use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Connection and tuning settings for the OQL client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSettings {
    pub base_url: String,
    pub query_path: String,
    pub request_timeout_seconds: u64,
    pub history_capacity: usize,
    pub max_query_length: usize,
    pub batch_delay_ms: u64,
    pub slow_query_threshold_ms: u64,
    pub health_check_query: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        ClientSettings {
            base_url: "http://localhost:3000".to_string(),
            query_path: "/api/oql/query".to_string(),
            request_timeout_seconds: 30,
            history_capacity: 100,
            max_query_length: 10_000,
            batch_delay_ms: 100,
            slow_query_threshold_ms: 5_000,
            health_check_query: "SELECT * LIMIT 1".to_string(),
        }
    }
}

impl ClientSettings {
    /// Parse settings from JSON; fields that are missing keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read `OQL_*` environment variables on top of the defaults
    pub fn from_env() -> Self {
        let defaults = ClientSettings::default();
        ClientSettings {
            base_url: env::var("OQL_BASE_URL").unwrap_or(defaults.base_url),
            query_path: env::var("OQL_QUERY_PATH").unwrap_or(defaults.query_path),
            request_timeout_seconds: env_or("OQL_REQUEST_TIMEOUT_SECONDS", defaults.request_timeout_seconds),
            history_capacity: env_or("OQL_HISTORY_CAPACITY", defaults.history_capacity),
            max_query_length: env_or("OQL_MAX_QUERY_LENGTH", defaults.max_query_length),
            batch_delay_ms: env_or("OQL_BATCH_DELAY_MS", defaults.batch_delay_ms),
            slow_query_threshold_ms: env_or("OQL_SLOW_QUERY_THRESHOLD_MS", defaults.slow_query_threshold_ms),
            health_check_query: env::var("OQL_HEALTH_CHECK_QUERY").unwrap_or(defaults.health_check_query),
        }
    }

    /// Full URL queries are posted to
    pub fn query_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.query_path.trim_start_matches('/')
        )
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring unparseable {}={:?}, using default", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = ClientSettings::from_json(r#"{"baseUrl": "https://oql.example.com", "historyCapacity": 25}"#)
            .unwrap();
        assert_eq!(settings.base_url, "https://oql.example.com");
        assert_eq!(settings.history_capacity, 25);
        assert_eq!(settings.max_query_length, 10_000);
        assert_eq!(settings.slow_query_threshold_ms, 5_000);
    }

    #[test]
    fn test_query_url_joins_slashes() {
        let settings = ClientSettings {
            base_url: "https://oql.example.com/".to_string(),
            query_path: "/api/oql/query".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.query_url(), "https://oql.example.com/api/oql/query");
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("OQL_TEST_ENV_OR_GARBAGE", "not-a-number");
        assert_eq!(env_or("OQL_TEST_ENV_OR_GARBAGE", 42u64), 42);
        env::set_var("OQL_TEST_ENV_OR_VALID", " 7 ");
        assert_eq!(env_or("OQL_TEST_ENV_OR_VALID", 42u64), 7);
        assert_eq!(env_or("OQL_TEST_ENV_OR_UNSET", 3usize), 3);
    }
}
