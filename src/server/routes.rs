//! Catalog API handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use super::AppState;
use super::error::ApiError;
use crate::catalog::Course;

/// GET /api/courses
pub async fn list_courses(State(state): State<Arc<AppState>>) -> Json<Vec<Course>> {
    Json(state.catalog.courses().to_vec())
}

/// GET /api/courses/{id}
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Course>, ApiError> {
    state.catalog.find_by_key(&id).cloned().map(Json).ok_or(ApiError::CourseNotFound)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
