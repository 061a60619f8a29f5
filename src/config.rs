use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: String,
    pub host: String,
    pub server_port: u16,
    pub db: DbConfig,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub source: DbSource,
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

#[derive(Clone)]
pub enum DbSource {
    Url(String),
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        name: String,
    },
}

// Keeps credentials out of logs.
impl std::fmt::Debug for DbSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbSource::Url(_) => f.write_str("Url(..)"),
            DbSource::Parts {
                host, port, name, ..
            } => write!(f, "Parts {{ {}:{}/{} }}", host, port, name),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let source = match get("DATABASE_URL") {
            Some(url) => DbSource::Url(url),
            None => DbSource::Parts {
                host: required("DB_HOST")?,
                port: parse("DB_PORT", &required("DB_PORT")?)?,
                username: required("DB_USERNAME")?,
                password: required("DB_PASSWORD")?,
                name: required("DB_NAME")?,
            },
        };

        let ssl_mode = match get("DB_SSLMODE") {
            Some(raw) => PgSslMode::from_str(raw.trim()).map_err(|_| ConfigError::Invalid {
                key: "DB_SSLMODE",
                value: raw,
            })?,
            None => PgSslMode::Disable,
        };

        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => parse("DB_MAX_CONNECTIONS", &raw)?,
            None => 10,
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", &raw)?),
            None => Duration::from_secs(10),
        };

        Ok(Config {
            env: get("ENV").unwrap_or_else(|| "development".to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse("SERVER_PORT", &required("SERVER_PORT")?)?,
            db: DbConfig {
                source,
                ssl_mode,
                max_connections,
            },
            request_timeout,
        })
    }
}

impl DbConfig {
    // DB_SSLMODE overrides any sslmode in DATABASE_URL
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let options = match &self.source {
            DbSource::Url(url) => {
                PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid {
                    key: "DATABASE_URL",
                    value: "<redacted>".to_string(),
                })?
            }
            DbSource::Parts {
                host,
                port,
                username,
                password,
                name,
            } => PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(name),
        };
        Ok(options.ssl_mode(self.ssl_mode))
    }

    pub fn database_name(&self) -> Option<&str> {
        match &self.source {
            DbSource::Url(_) => None,
            DbSource::Parts { name, .. } => Some(name),
        }
    }
}

fn parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}
