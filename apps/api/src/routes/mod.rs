//! # HTTP Routes
//!
//! Router assembly and the handlers shared by every route group.
//!
//! ## Available Route Groups
//!
//! - [`team_items`] - Catalog, item CRUD, price and progress reads
//! - [`participants`] - Join, leave, and participant listing

pub mod participants;
pub mod team_items;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::AppState;

/// Builds the application router with request tracing.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/team-items",
            get(team_items::list_team_items).post(team_items::create_team_item),
        )
        .route(
            "/api/team-items/{id}",
            get(team_items::get_team_item).delete(team_items::delete_team_item),
        )
        .route("/api/team-items/{id}/pricing", put(team_items::update_pricing))
        .route("/api/team-items/{id}/price", get(team_items::get_price))
        .route("/api/team-items/{id}/progress", get(team_items::get_progress))
        .route(
            "/api/team-items/{id}/participants",
            get(participants::list_participants).post(participants::join_team_item),
        )
        .route(
            "/api/team-items/{id}/participants/{user_id}",
            delete(participants::leave_team_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_handler(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    if state.db.health_check().await {
        Ok("OK")
    } else {
        Err(ApiError::new(
            ErrorCode::ServiceUnavailable,
            "Database unavailable",
        ))
    }
}
