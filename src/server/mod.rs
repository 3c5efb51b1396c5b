//! Catalog HTTP server
//!
//! Serves the static course list over `/api/courses` and
//! `/api/courses/{id}`, plus a `/health` probe.

mod error;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;

pub use error::ApiError;

/// Shared server state
pub struct AppState {
    /// Courses served by the API
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/courses", get(routes::list_courses))
        .route("/api/courses/{id}", get(routes::get_course))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `catalog` on `listener` until the process is stopped
pub async fn serve(listener: TcpListener, catalog: Catalog) -> Result<()> {
    let app = create_router(Arc::new(AppState::new(catalog)));
    tracing::info!("Catalog server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
