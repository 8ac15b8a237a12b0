use super::error::SearchError;
use super::gateway::SearchGateway;
use super::types::ResultPage;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/api/1.0/search";
pub const ENDPOINT_SEARCH_ALBUMS: &str = "/api/1.0/search/albums";
pub const ENDPOINT_SEARCH_ARTISTS: &str = "/api/1.0/search/artists";
pub const ENDPOINT_HEALTH: &str = "/health";

/// Query string of the search endpoints.
///
/// Numbers are signed so that zero and negative values reach validation.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name_entry: Option<String>,
    pub per_page: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn routes(gateway: Arc<SearchGateway>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search_all))
        .route(ENDPOINT_SEARCH_ALBUMS, get(handle_search_albums))
        .route(ENDPOINT_SEARCH_ARTISTS, get(handle_search_artists))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(gateway))
}

/// Malformed query strings are reported like any other invalid argument.
fn search_params(
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<SearchParams, SearchError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| SearchError::InvalidArgument(rejection.body_text()))
}

pub async fn handle_search_all(
    params: Result<Query<SearchParams>, QueryRejection>,
    Extension(gateway): Extension<Arc<SearchGateway>>,
) -> Result<Json<ResultPage>, SearchError> {
    let params = search_params(params)?;
    let page = gateway
        .search_all(params.name_entry.as_deref(), params.per_page, params.page)
        .await?;
    Ok(Json(page))
}

pub async fn handle_search_albums(
    params: Result<Query<SearchParams>, QueryRejection>,
    Extension(gateway): Extension<Arc<SearchGateway>>,
) -> Result<Json<ResultPage>, SearchError> {
    let params = search_params(params)?;
    let page = gateway
        .search_albums(params.name_entry.as_deref(), params.per_page, params.page)
        .await?;
    Ok(Json(page))
}

pub async fn handle_search_artists(
    params: Result<Query<SearchParams>, QueryRejection>,
    Extension(gateway): Extension<Arc<SearchGateway>>,
) -> Result<Json<ResultPage>, SearchError> {
    let params = search_params(params)?;
    let page = gateway
        .search_artists(params.name_entry.as_deref(), params.per_page, params.page)
        .await?;
    Ok(Json(page))
}

pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
