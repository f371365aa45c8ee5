//! HTTP surface - a thin JSON layer over [`crate::core`].
//!
//! Handlers extract the acting user, call one core operation and serialize its result.
//! They hold no business rules of their own.

mod boards;
mod cards;
/// Core error to HTTP response mapping
pub mod error;
/// Request extractors: the acting user and JSON/path/query wrappers
pub mod extract;
mod subjects;

use crate::config::server::ServerConfig;
use axum::{
    Router,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Server settings
    pub config: ServerConfig,
}

/// Handler state as stored in the router.
pub type SharedState = Arc<AppState>;

/// Builds the full application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/subjects", get(subjects::list_subjects))
        .route("/api/dashboard", get(boards::dashboard))
        .route(
            "/api/boards",
            get(boards::list_boards).post(boards::create_board),
        )
        .route("/api/boards/{id}", get(boards::get_board))
        .route("/api/boards/{id}/cards", get(boards::list_cards))
        .route("/api/boards/{id}/reset", post(boards::reset_board))
        .route("/api/boards/{id}/settings", patch(boards::update_setting))
        .route("/api/boards/{id}/start-today", post(boards::start_today))
        .route("/api/cards/{id}/status", patch(cards::set_status))
        .route("/api/cards/{id}/plan", patch(cards::set_plan))
        .route("/api/cards/{id}/notes", patch(cards::set_notes))
        .route(
            "/api/checklist-items/{id}",
            patch(cards::toggle_checklist_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
