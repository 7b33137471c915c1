//! JSON API over the catalog database

mod error;
pub mod handlers;
pub mod params;
pub mod resources;

use crate::config::ServerConfig;
use crate::db::Database;
use crate::error::Result;
use crate::logging::log_request;
use axum::http::Method;
use axum::routing::get;
use axum::{middleware, Router};
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use url::Url;

/// Shared state handed to every API handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    /// Absolute URL of the list endpoint, the base of pagination links
    pub recipes_url: Arc<Url>,
}

impl AppState {
    /// `public_url` is where clients reach the API, e.g. `http://localhost:8000`
    pub fn new(db: Database, public_url: &str) -> Result<Self> {
        let base = Url::parse(&format!("{}/", public_url.trim_end_matches('/')))?;
        let recipes_url = base.join("api/recipes")?;
        Ok(Self {
            db,
            recipes_url: Arc::new(recipes_url),
        })
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    // The browsing frontend may live on another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/recipes", get(handlers::index))
        .route("/api/recipes/:slug", get(handlers::view))
        .layer(middleware::from_fn(log_request))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve the API until Ctrl-C
pub async fn serve(db: Database, config: &ServerConfig) -> Result<()> {
    let state = AppState::new(db, &config.public_url)?;
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "Catalog API listening on {} (public URL {})",
        listener.local_addr()?,
        config.public_url
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    Ok(())
}
