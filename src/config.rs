//! Configuration from the environment
//!
//! Empty variables count as unset

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use sqlx::PgPool;

use crate::storage::PostgresOptions;

const DEFAULT_ADDRESS: &str = "0.0.0.0:6000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Where campaigns and notes are kept
pub enum StorageConfig {
    /// In memory, gone on shutdown
    Memory,

    /// Connect to Postgres
    Postgres(PostgresOptions),

    /// Use an existing Postgres pool
    #[cfg_attr(not(test), expect(dead_code))]
    ExistingPool(PgPool),
}

/// Everything needed to start the server
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Storage to use
    pub storage: StorageConfig,
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration with `lookup` resolving the variables
    fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut address = var("ADDRESS")
            .as_deref()
            .unwrap_or(DEFAULT_ADDRESS)
            .parse::<SocketAddr>()
            .context("Invalid `ADDRESS`")?;

        // optional override of just the port
        if let Some(port) = var("PORT") {
            address.set_port(port.parse::<u16>().context("Invalid `PORT`")?);
        }

        let storage = match var("DATABASE_URL") {
            Some(url) => {
                let max_connections = var("DATABASE_MAX_CONNECTIONS")
                    .map(|value| value.parse::<u32>())
                    .transpose()
                    .context("Invalid `DATABASE_MAX_CONNECTIONS`")?
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS);

                StorageConfig::Postgres(PostgresOptions {
                    url,
                    max_connections,
                    acquire_timeout: ACQUIRE_TIMEOUT,
                })
            }
            None => StorageConfig::Memory,
        };

        Ok(Self { address, storage })
    }
}
