use crate::core::engine::SearchEngine;
use crate::domain::model::{Coordinates, FavoriteEntry, SearchCriteria, Slot, Venue};
use crate::utils::error::ScoutError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// HTTP boundary toward the presentation layer. Thin by design: handlers
/// deserialize, call the engine and serialize; nothing here owns logic.
pub fn router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/venues", get(venues))
        .route("/favorites/check", post(check_favorites))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub criteria: SearchCriteria,
    pub user_location: Option<Coordinates>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub options: Vec<Slot>,
}

async fn search(
    State(engine): State<Arc<SearchEngine>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let options = engine
        .search(&request.criteria, request.user_location)
        .await?;
    Ok(Json(SearchResponse { options }))
}

async fn venues(State(engine): State<Arc<SearchEngine>>) -> Json<Vec<Venue>> {
    Json(engine.venues().to_vec())
}

fn default_check_duration() -> u32 {
    60
}

#[derive(Debug, Deserialize)]
pub struct FavoritesCheckRequest {
    pub date: NaiveDate,
    /// One duration class per check; favorites of other durations come back
    /// unavailable.
    #[serde(default = "default_check_duration")]
    pub duration_minutes: u32,
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesCheckResponse {
    pub availability: HashMap<String, bool>,
}

async fn check_favorites(
    State(engine): State<Arc<SearchEngine>>,
    Json(request): Json<FavoritesCheckRequest>,
) -> Result<Json<FavoritesCheckResponse>, ApiError> {
    let availability = engine
        .check_favorites(request.date, request.duration_minutes, &request.favorites)
        .await?;
    Ok(Json(FavoritesCheckResponse { availability }))
}

async fn health() -> &'static str {
    "OK"
}

/// Maps engine errors onto HTTP statuses. Bad input is the caller's problem;
/// everything else is ours.
pub struct ApiError(ScoutError);

impl From<ScoutError> for ApiError {
    fn from(e: ScoutError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScoutError::InvalidCriteriaError { .. } | ScoutError::InvalidPersonCountError(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
