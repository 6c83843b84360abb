// src/config.rs
//
// Runtime configuration from COFFEE_* environment variables

use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,

    /// SQLite file path, or `:memory:`
    pub database_url: String,
    pub db_max_connections: u32,

    /// Load data.sql into an empty database on startup
    pub seed_data: bool,

    /// Root of the query metadata artifacts
    pub aot_metadata_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_string =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = env_string("COFFEE_BIND_ADDR", "127.0.0.1:8080")
            .parse::<SocketAddr>()
            .context("COFFEE_BIND_ADDR must be a valid host:port")?;

        let database_url = env_string("COFFEE_DATABASE_URL", "coffeehouse.db");

        let db_max_connections = env_string("COFFEE_DB_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("COFFEE_DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            anyhow::bail!("COFFEE_DB_MAX_CONNECTIONS must be a positive integer");
        }

        let seed_data = parse_flag(&env_string("COFFEE_SEED_DATA", "true"))
            .context("COFFEE_SEED_DATA must be true or false")?;

        let aot_metadata_dir = PathBuf::from(env_string("COFFEE_AOT_METADATA_DIR", "aot"));

        Ok(Self {
            bind_addr,
            database_url,
            db_max_connections,
            seed_data,
            aot_metadata_dir,
        })
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => anyhow::bail!("unrecognised flag value '{}'", other),
    }
}
