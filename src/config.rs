use std::env;

use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PASSWORD_ITERATIONS: u32 = 260_000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set in the environment or .env file")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Configuration du process, lue une fois au démarrage
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: String,
    pub port: u16,
    pub password_iterations: u32,
    pub tmdb_api_key: Option<String>,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construit la config depuis n'importe quel lookup (les tests ne touchent pas l'env)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let password_iterations = match lookup("PASSWORD_ITERATIONS") {
            Some(value) => match value.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "PASSWORD_ITERATIONS",
                        value,
                    })
                }
            },
            None => DEFAULT_PASSWORD_ITERATIONS,
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            password_iterations,
            tmdb_api_key: lookup("TMDB_API_KEY").filter(|v| !v.is_empty()),
            cors_origin: lookup("CORS_ORIGIN")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        })
    }
}
