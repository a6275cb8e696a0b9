//! Process configuration read from the environment.
//!
//! `main` loads `.env` (if any) before calling [`AppConfig::from_env`].

use std::fmt;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_STORAGE: &str = "database.sqlite";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.key, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        // DATABASE_URL wins; DB_STORAGE is a plain SQLite file path.
        let database_url = match lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            Some(url) => url,
            None => {
                let storage = lookup("DB_STORAGE")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DB_STORAGE.to_string());
                format!("sqlite://{storage}?mode=rwc")
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(AppConfig {
            host,
            port,
            database_url,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.database_url, "sqlite://database.sqlite?mode=rwc");
        assert_eq!(cfg.max_connections, 5);
    }

    #[test]
    fn db_storage_becomes_sqlite_url() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("DB_STORAGE", "data/app.db")])).unwrap();
        assert_eq!(cfg.database_url, "sqlite://data/app.db?mode=rwc");
    }

    #[test]
    fn database_url_takes_precedence() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_STORAGE", "ignored.db"),
        ]))
        .unwrap();
        assert_eq!(cfg.database_url, "sqlite::memory:");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "PORT");
    }

    #[test]
    fn zero_connections_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("DB_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert_eq!(err.key, "DB_MAX_CONNECTIONS");
    }
}
