//! Runtime configuration loaded from the environment.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::{info, warn};

const DEFAULT_DATABASE_URL: &str = "sqlite:petshop.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL, e.g. `sqlite:petshop.db`
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Origin allowed by the CORS layer
    pub frontend_origin: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            database_url: try_load("PETSHOP_DATABASE_URL", DEFAULT_DATABASE_URL)?,
            bind_addr: try_load("PETSHOP_BIND_ADDR", DEFAULT_BIND_ADDR)?,
            frontend_origin: try_load("PETSHOP_FRONTEND_ORIGIN", DEFAULT_FRONTEND_ORIGIN)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Environment misconfigured: {key}={raw}: {e}")
    })
}
