#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]

use std::net::SocketAddr;

use anyhow::Context;
use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::api::BODY_LIMIT;
use crate::api::router;
use crate::storage::Memory;
use crate::storage::Postgres;
use crate::storage::Storage;
use crate::storage::StorageConfig;
use crate::utils::env_var;
use crate::utils::resolve_address;

mod api;
mod graceful_shutdown;
mod notes;
mod storage;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "notekeeper=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(StorageConfig::from_env()).await?;

    let address = setup_address()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(graceful_shutdown::handler())
        .await?;

    Ok(())
}

/// Create and setup the app with its storage
///
/// # Errors
///
/// Will return `Err` if the storage can not be connected to or migrated
pub async fn setup_app(config: StorageConfig) -> Result<Router> {
    let router = match config {
        StorageConfig::Postgres(database_url) => {
            let storage = Postgres::connect(&database_url)
                .await
                .context("Could not connect to Postgres")?;

            tracing::info!("Storing notes in Postgres");

            create_router(storage)
        }
        StorageConfig::ExistingConnection(pool) => {
            let storage = Postgres::new_with_pool(pool)
                .await
                .context("Could not migrate Postgres")?;

            create_router(storage)
        }
        StorageConfig::Memory => create_router(Memory::new()),
    };

    Ok(router)
}

/// Create the router for all notes
fn create_router<S: Storage>(storage: S) -> Router {
    Router::new()
        .nest("/api", router::<S>())
        .fallback(api::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(setup_cors())
                .layer(DefaultBodyLimit::max(BODY_LIMIT))
                .layer(Extension(storage)),
        )
}

/// Requests are allowed from any origin
fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
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
            env_var("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let address = env_var("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.into());

    // optional override of just the port
    resolve_address(&address, env_var("PORT").as_deref())
}
