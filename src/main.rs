#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::router;
use crate::config::Config;
use crate::config::StorageConfig;
use crate::storage::Memory;
use crate::storage::Postgres;
use crate::storage::Storage;

mod api;
mod campaigns;
mod config;
mod graceful_shutdown;
mod notes;
mod root;
mod storage;
#[cfg(test)]
mod tests;

const DEFAULT_RUST_LOG: &str = "campaign_notes=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let config = Config::from_env()?;

    let app = setup_app(config.storage).await?;

    let listener = TcpListener::bind(config.address).await?;
    tracing::info!("Listening on {}", config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage can not be reached or migrated
pub async fn setup_app(storage: StorageConfig) -> Result<Router> {
    let app = match storage {
        StorageConfig::Memory => {
            tracing::warn!("`DATABASE_URL` is not set, everything is kept in memory");

            create_router(Memory::new())
        }
        StorageConfig::Postgres(options) => create_router(Postgres::connect(&options).await?),
        StorageConfig::ExistingPool(pool) => create_router(Postgres::new_with_pool(pool).await?),
    };

    Ok(app)
}

/// Create the router for Campaign Notes
fn create_router<S: Storage>(storage: S) -> Router {
    Router::new()
        .route("/", get(root::root))
        .merge(router::<S>())
        .fallback(root::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(storage)
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}
