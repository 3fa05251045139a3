//! Process configuration read from the environment.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("invalid RUN_MIGRATIONS value: {0}")]
    InvalidFlag(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub cors_origin: Option<String>,
    pub run_migrations: bool,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cors_origin = lookup("CORS_ALLOW_ORIGIN").filter(|origin| !origin.trim().is_empty());

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidFlag(raw)),
            },
            None => true,
        };

        Ok(Self {
            port,
            database_url,
            cors_origin,
            run_migrations,
        })
    }
}
