// Process configuration, read once at start up.
//
// Sources
// - Environment variables, with a `.env` file loaded first when present.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing DB_DSN")]
    MissingDatabaseUrl,

    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub environment: String,
    pub timezone: String,
    pub migrations_dir: Option<PathBuf>,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case outside local development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DB_DSN").ok_or(ConfigError::MissingDatabaseUrl)?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(
            get("DB_MAX_CONNECTIONS"),
            "DB_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;

        Ok(Self {
            database_url,
            port,
            environment: get("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            timezone: get("TZ").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            migrations_dir: get("MIGRATIONS_DIR").map(PathBuf::from),
            max_connections,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
