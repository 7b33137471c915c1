//! Request handlers for the catalog API

use crate::api::params::ListQuery;
use crate::api::resources::{RecipeCollection, RecipeResource};
use crate::api::AppState;
use crate::dataset;
use crate::db::recipes;
use crate::error::CatalogError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use log::debug;

/// List recipes with filtering, sorting and pagination
///
/// GET /api/recipes
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<RecipeCollection>, CatalogError> {
    let Query(query) = query.map_err(|e| CatalogError::Validation(e.body_text()))?;
    let params = query.to_params();
    debug!("Listing recipes with {:?}", params);

    let page = {
        let conn = state.db.lock()?;
        dataset::paginate(&conn, &params)?
    };

    Ok(Json(RecipeCollection::from_page(
        page,
        &state.recipes_url,
        &params,
    )))
}

/// Show one recipe
///
/// GET /api/recipes/:slug
pub async fn view(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<RecipeResource>, CatalogError> {
    let recipe = {
        let conn = state.db.lock()?;
        recipes::find_by_slug(&conn, &slug)?
    };

    let recipe = recipe.ok_or(CatalogError::NotFound(slug))?;
    Ok(Json(RecipeResource {
        data: recipe.into(),
    }))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}
