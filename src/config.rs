//! Process configuration read from the environment (and `.env` when present).

use crate::error::ConfigError;
use std::env;
use std::str::FromStr;

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://front-crud-spring.netlify.app",
    "http://127.0.0.1:5500",
];

/// Which repository implementation backs the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub store: StoreKind,
    /// Static CORS allow-list.
    pub cors_origins: Vec<String>,
    pub request_body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            database_url: "postgres://localhost/person_registry".into(),
            db_max_connections: 5,
            store: StoreKind::Postgres,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            request_body_limit: 64 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: lookup("APP_HOST").unwrap_or(defaults.host),
            port: parse_or("APP_PORT", lookup("APP_PORT"), defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )?,
            store: match lookup("PERSON_STORE") {
                Some(s) => s.parse()?,
                None => defaults.store,
            },
            cors_origins: match lookup("CORS_ALLOWED_ORIGINS") {
                Some(s) => s
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
                None => defaults.cors_origins,
            },
            request_body_limit: parse_or(
                "REQUEST_BODY_LIMIT",
                lookup("REQUEST_BODY_LIMIT"),
                defaults.request_body_limit,
            )?,
        })
    }

    pub fn for_testing() -> Self {
        Self {
            store: StoreKind::Memory,
            ..Self::default()
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.store, StoreKind::Postgres);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("APP_PORT", "9000"),
            ("PERSON_STORE", "Memory"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.port, 9000);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err =
            AppConfig::from_lookup(lookup(&[("APP_PORT", "eighty")])).expect_err("bad port");
        assert!(matches!(err, ConfigError::Invalid { key: "APP_PORT", .. }));

        let err =
            AppConfig::from_lookup(lookup(&[("PERSON_STORE", "redis")])).expect_err("bad store");
        assert!(matches!(err, ConfigError::UnknownStore(_)));
    }
}
