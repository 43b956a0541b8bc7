// src/config.rs

use std::{env, time::Duration};

use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Direct connection to the booking database.
    Postgres { database_url: String, max_connections: u32 },
    /// PostgREST endpoint of the hosted backend.
    Rest { base_url: String, api_key: String, timeout: Duration },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub time_zone: Tz,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let time_zone = match lookup("CALENDAR_TIME_ZONE") {
            Some(raw) => raw.parse::<Tz>().map_err(|_| ConfigError::Invalid {
                key: "CALENDAR_TIME_ZONE",
                value: raw,
            })?,
            None => chrono_tz::Europe::Brussels,
        };

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "postgres".into());
        let store = match backend.trim().to_lowercase().as_str() {
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?,
            },
            "rest" => StoreBackend::Rest {
                base_url: lookup("SUPABASE_URL")
                    .ok_or(ConfigError::Missing("SUPABASE_URL"))?
                    .trim_end_matches('/')
                    .to_string(),
                api_key: lookup("SUPABASE_KEY").ok_or(ConfigError::Missing("SUPABASE_KEY"))?,
                timeout: Duration::from_secs(parse_or(&lookup, "STORE_TIMEOUT_SECS", 30u64)?),
            },
            _ => {
                return Err(ConfigError::Invalid { key: "STORE_BACKEND", value: backend });
            }
        };

        Ok(Self { port, time_zone, store })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn postgres_is_the_default_backend() {
        let cfg = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/app")]))
            .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.time_zone, chrono_tz::Europe::Brussels);
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/app".into(),
                max_connections: 10,
            }
        );
    }

    #[test]
    fn rest_backend_needs_url_and_key() {
        let err = Config::from_lookup(lookup(&[("STORE_BACKEND", "rest")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));

        let cfg = Config::from_lookup(lookup(&[
            ("STORE_BACKEND", "REST"),
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("SUPABASE_KEY", "anon"),
            ("STORE_TIMEOUT_SECS", "5"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(
            cfg.store,
            StoreBackend::Rest {
                base_url: "https://demo.supabase.co".into(),
                api_key: "anon".into(),
                timeout: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://x"),
            ("CALENDAR_TIME_ZONE", "Mars/Olympus"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "CALENDAR_TIME_ZONE", .. }));

        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = Config::from_lookup(lookup(&[("STORE_BACKEND", "sqlite")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORE_BACKEND", .. }));
    }
}
