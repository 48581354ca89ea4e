use dish_search::DEFAULT_TOP_N;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub top_n: NonZeroUsize,
    pub seed_demo_data: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in .env file")]
    Missing(&'static str),
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; `from_env` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |var| lookup(var).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
                reason: "expected a port number",
            })?,
            None => 3000,
        };

        let top_n = match get("SEARCH_TOP_N") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "SEARCH_TOP_N",
                value,
                reason: "expected a positive integer",
            })?,
            None => DEFAULT_TOP_N,
        };

        let seed_demo_data = match get("SEED_DEMO_DATA") {
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SEED_DEMO_DATA",
                        value,
                        reason: "expected true or false",
                    });
                }
            },
            None => false,
        };

        Ok(Self {
            database_url,
            host,
            port,
            top_n,
            seed_demo_data,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
