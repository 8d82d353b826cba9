//! # Participant Routes
//!
//! Joining and leaving a group buy. Each join or leave moves the live count,
//! so a join answers with the price the new participant will pay.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use nestling_core::validation::validate_user_id;
use nestling_core::Participation;

use crate::error::ApiResult;
use crate::routes::team_items::{load_team_item, ListQuery, PriceResponse, DEFAULT_LIST_LIMIT};
use crate::AppState;

/// Body of a join request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub user_id: String,
}

/// `POST /api/team-items/{id}/participants`
///
/// ## Returns
/// * `201` - Joined; body is the price at the new count
/// * `404` - Item doesn't exist
/// * `409` - User already joined
/// * `422` - Item is closed
pub async fn join_team_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PriceResponse>)> {
    let Json(request) = payload?;
    validate_user_id(&request.user_id)?;
    let user_id = request.user_id.trim();

    let item = load_team_item(&state.db, &id).await?;
    item.ensure_joinable()?;

    state.db.participations().join(&id, user_id).await?;

    // Read after the insert; concurrent joins may already be counted
    let participants = state.db.participations().count_for_item(&id).await?;

    info!(
        id = %id,
        user_id = %user_id,
        participants = participants,
        "Participant joined"
    );

    Ok((StatusCode::CREATED, Json(PriceResponse::new(item, participants))))
}

/// `GET /api/team-items/{id}/participants?limit=`
///
/// Participation records, earliest join first.
pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Participation>>> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(state.config.list_limit_max)
        .max(1);

    load_team_item(&state.db, &id).await?;
    let participants = state.db.participations().list_for_item(&id, limit).await?;

    Ok(Json(participants))
}

/// `DELETE /api/team-items/{id}/participants/{user_id}`
///
/// `user_id` is trimmed the same way as on join.
pub async fn leave_team_item(
    State(state): State<Arc<AppState>>,
    Path((id, user_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    validate_user_id(&user_id)?;
    let user_id = user_id.trim();

    state.db.participations().leave(&id, user_id).await?;
    info!(id = %id, user_id = %user_id, "Participant left");
    Ok(StatusCode::NO_CONTENT)
}
