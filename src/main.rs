use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod catalog;
mod config;
mod db;
mod error;
mod handlers;
mod models;

use crate::catalog::CatalogService;
use crate::config::Config;
use crate::db::PgProductStore;

/// Shared application state. Cloned per request; the store sits behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,catalog_automate_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("Catalog automate service starting");
    info!(
        table = %config.schema.table,
        title_column = %config.schema.title_column,
        "Product schema mapping"
    );

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established.");

    let store = PgProductStore::new(pool, config.schema.clone());
    let state = AppState {
        catalog: CatalogService::new(Arc::new(store)),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Automation feed ─────────────────────────────────────────────────
        .route(
            "/api/automate/products/list",
            get(handlers::automate::products_list),
        )
        .route(
            "/api/automate/products/by-country",
            get(handlers::automate::list_products_by_country),
        )
        .route(
            "/api/automate/products/cities",
            get(handlers::automate::cities_by_country),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
