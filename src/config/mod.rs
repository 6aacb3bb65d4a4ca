//! Runtime settings read from the environment (`.env` is loaded by the binary).

use crate::error::AppError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/film_catalog";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `CATALOG_SCHEMA`: schema holding the actor, film and film_actor tables.
    pub schema: String,
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `SEED_DEMO`: insert the demo actor and film at startup.
    pub seed_demo: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|_| AppError::Config(format!("BIND_ADDR: invalid socket address '{}'", bind)))?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("DATABASE_MAX_CONNECTIONS: invalid value '{}'", v)))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let seed_demo = match get("SEED_DEMO").as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("0") | Some("false") | Some("no") => false,
            Some("1") | Some("true") | Some("yes") => true,
            Some(other) => return Err(AppError::Config(format!("SEED_DEMO: invalid value '{}'", other))),
        };

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            schema: get("CATALOG_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            bind_addr,
            max_connections,
            seed_demo,
        })
    }
}
