//! Request handlers.
//!
//! # Endpoints
//!
//! - `GET /icon/{name}` - sprite URL for a creature (plain text, no lookup)
//! - `GET /pokemon` - filtered, sorted, paginated listing
//! - `POST /capture/{name}` - mark a creature as captured
//! - `POST /release/{name}` - release a captured creature
//! - `GET /health` - liveness and catalog size

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiErrorResponse;
use super::AppState;
use crate::core::query::{list_creatures, ListParams, ListQuery};
use crate::core::{Confirmation, CreaturePage};

pub async fn get_icon(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<String, ApiErrorResponse> {
    let Path(name) = name?;
    Ok(icon_url(&state.icon_base_url, &name))
}

pub fn icon_url(base_url: &str, name: &str) -> String {
    format!("{}/{}.png", base_url.trim_end_matches('/'), name.to_lowercase())
}

pub async fn list_pokemon(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<CreaturePage>, ApiErrorResponse> {
    let Query(params) = params?;
    let query = ListQuery::from_params(&params, state.default_page_size)?;
    let page = list_creatures(&state.catalog, &state.registry, &query);
    Ok(Json(page))
}

pub async fn capture_pokemon(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Confirmation>, ApiErrorResponse> {
    let Path(name) = name?;
    Ok(Json(state.registry.capture(&name)?))
}

pub async fn release_pokemon(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<Confirmation>, ApiErrorResponse> {
    let Path(name) = name?;
    Ok(Json(state.registry.release(&name)?))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub creatures: usize,
    pub captured: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        creatures: state.catalog.len(),
        captured: state.registry.len(),
    })
}
