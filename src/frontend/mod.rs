//! Browsing frontend.
//!
//! A separate axum app that renders HTML pages from the catalog API. It never
//! touches the database; everything goes through a [`CatalogApi`].

pub mod client;
pub mod views;

pub use client::{CatalogApi, HttpCatalogApi};

use crate::api::params::ListQuery;
use crate::config::FrontendConfig;
use crate::error::{CatalogError, Result};
use crate::logging::log_request;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{middleware, Router};
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Shared state of the frontend: the API client
#[derive(Clone)]
pub struct FrontendState {
    pub api: Arc<dyn CatalogApi>,
}

impl FrontendState {
    pub fn new(api: impl CatalogApi + 'static) -> Self {
        Self { api: Arc::new(api) }
    }
}

/// Create the frontend router
pub fn create_router(state: FrontendState) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/:slug", get(detail))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind and serve the frontend until Ctrl-C
pub async fn serve(config: &FrontendConfig) -> Result<()> {
    let api = HttpCatalogApi::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(
        "Frontend listening on {} (catalog API at {})",
        listener.local_addr()?,
        config.api_url
    );

    axum::serve(listener, create_router(FrontendState::new(api)))
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    Ok(())
}

fn upstream_failure(err: CatalogError) -> Response {
    error!("Catalog API request failed: {}", err);
    (
        StatusCode::BAD_GATEWAY,
        Html(views::error_page(
            "The recipe catalog could not be reached. Please try again later.",
        )),
    )
        .into_response()
}

/// GET /
async fn list(
    State(state): State<FrontendState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::error_page(&rejection.body_text())),
            )
                .into_response()
        }
    };

    match state.api.list(&query).await {
        Ok(collection) => Html(views::list_page(&query, &collection)).into_response(),
        Err(err) => upstream_failure(err),
    }
}

/// GET /:slug
async fn detail(State(state): State<FrontendState>, Path(slug): Path<String>) -> Response {
    match state.api.get(&slug).await {
        Ok(Some(recipe)) => Html(views::detail_page(&recipe)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Html(views::not_found_page(&slug))).into_response(),
        Err(err) => upstream_failure(err),
    }
}
