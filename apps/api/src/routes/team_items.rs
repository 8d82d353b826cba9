//! # Team Item Routes
//!
//! Catalog, item administration, and the price/progress reads that clients
//! poll while a group buy fills up.
//!
//! ## Price Read Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    GET /api/team-items/{id}/progress                    │
//! │                                                                         │
//! │  load item ──► 404 if missing                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  count_for_item(id) ── live participant count                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_pricing_progress(count, &item.pricing)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { currentPrice, discountPercent, toNextStep, progressPercent, ... }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are never stored; each read recomputes them from the count.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use nestling_core::validation::validate_pricing_parameters;
use nestling_core::{
    compute_discounted_price, compute_pricing_progress, price_snapshot, CoreError, Money,
    NewTeamItem, PriceSnapshot, PricingParameters, ProgressSnapshot, TeamItem,
};
use nestling_db::{generate_team_item_id, Database};

use crate::error::ApiResult;
use crate::AppState;

/// Page size when the client does not ask for one.
pub(crate) const DEFAULT_LIST_LIMIT: u32 = 20;

// =============================================================================
// DTOs
// =============================================================================

/// Catalog query string.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

/// One catalog row: the item, its participant count, and its current price.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub item: TeamItem,
    pub participants: u64,
    #[serde(flatten)]
    pub price: PriceSnapshot,
}

/// Price read for a single item.
///
/// `finalPrice` is what a participant pays at the current count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    pub item: TeamItem,
    pub participants: u64,
    pub final_price: Money,
}

impl PriceResponse {
    pub fn new(item: TeamItem, participants: u64) -> Self {
        let final_price = compute_discounted_price(participants, &item.pricing);
        PriceResponse {
            item,
            participants,
            final_price,
        }
    }
}

/// Progress read backing the item detail page's progress bar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub item_id: String,
    pub participants: u64,
    #[serde(flatten)]
    pub progress: ProgressSnapshot,
}

// =============================================================================
// Helpers
// =============================================================================

/// Loads an item or fails with 404.
pub(crate) async fn load_team_item(db: &Database, id: &str) -> ApiResult<TeamItem> {
    db.team_items()
        .get_by_id(id)
        .await?
        .ok_or_else(|| CoreError::TeamItemNotFound(id.to_string()).into())
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/team-items?limit=`
///
/// Active items, newest first, each priced at its live count. `limit` is
/// clamped to `[1, list_limit_max]`.
pub async fn list_team_items(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CatalogEntry>>> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(state.config.list_limit_max)
        .max(1);

    debug!(limit = limit, "Listing team items");

    let rows = state.db.team_items().list_active_with_counts(limit).await?;

    let entries = rows
        .into_iter()
        .map(|(item, participants)| {
            let price = price_snapshot(participants, &item.pricing);
            CatalogEntry {
                item,
                participants,
                price,
            }
        })
        .collect();

    Ok(Json(entries))
}

/// `POST /api/team-items`
pub async fn create_team_item(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewTeamItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TeamItem>)> {
    let Json(new_item) = payload?;

    let item = new_item.into_team_item(generate_team_item_id(), Utc::now())?;
    let item = state.db.team_items().insert(&item).await?;

    info!(
        id = %item.id,
        title = %item.title,
        base_price = item.pricing.base_price.units(),
        "Team item created"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /api/team-items/{id}`
pub async fn get_team_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TeamItem>> {
    let item = load_team_item(&state.db, &id).await?;
    Ok(Json(item))
}

/// `PUT /api/team-items/{id}/pricing`
///
/// Replaces the pricing parameters. Rejects anything the write-time rules
/// forbid; the stored row is untouched on rejection.
pub async fn update_pricing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PricingParameters>, JsonRejection>,
) -> ApiResult<Json<TeamItem>> {
    let Json(pricing) = payload?;

    validate_pricing_parameters(&pricing)?;
    state.db.team_items().update_pricing(&id, &pricing).await?;

    info!(id = %id, "Team item pricing updated");

    let item = load_team_item(&state.db, &id).await?;
    Ok(Json(item))
}

/// `DELETE /api/team-items/{id}`
pub async fn delete_team_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.team_items().soft_delete(&id).await?;
    info!(id = %id, "Team item closed");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/team-items/{id}/price`
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PriceResponse>> {
    let item = load_team_item(&state.db, &id).await?;
    let participants = state.db.participations().count_for_item(&id).await?;

    debug!(id = %id, participants = participants, "Pricing team item");

    Ok(Json(PriceResponse::new(item, participants)))
}

/// `GET /api/team-items/{id}/progress`
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProgressResponse>> {
    let item = load_team_item(&state.db, &id).await?;
    let participants = state.db.participations().count_for_item(&id).await?;

    Ok(Json(ProgressResponse {
        progress: compute_pricing_progress(participants, &item.pricing),
        item_id: item.id,
        participants,
    }))
}

// =============================================================================
// Route Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{create_item, join_many, send, test_app, test_app_with};
    use crate::ApiConfig;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_create_and_get() {
        let (app, _) = test_app().await;
        let (status, created) = send(
            &app,
            "POST",
            "/api/team-items",
            Some(json!({
                "title": "  Swaddle blankets  ",
                "description": "Set of four",
                "basePrice": 4800,
                "minPrice": 3600,
                "discountStepEvery": 5,
                "discountStepPercent": 2.0,
                "maxDiscountPercent": 20.0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Swaddle blankets");
        assert_eq!(created["basePrice"], 4800);
        assert_eq!(created["isActive"], true);

        let id = created["id"].as_str().unwrap();
        let (status, fetched) = send(&app, "GET", &format!("/api/team-items/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], id);
        assert_eq!(fetched["discountStepEvery"], 5);
    }

    #[tokio::test]
    async fn test_create_rejects_floor_above_base() {
        let (app, _) = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/team-items",
            Some(json!({
                "title": "Stroller",
                "basePrice": 10000,
                "minPrice": 12000,
                "discountStepEvery": 10,
                "discountStepPercent": 1.0,
                "maxDiscountPercent": 30.0
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, "POST", "/api/team-items", Some(json!({ "title": 7 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_item_is_404() {
        let (app, _) = test_app().await;
        for uri in [
            "/api/team-items/missing",
            "/api/team-items/missing/price",
            "/api/team-items/missing/progress",
        ] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_price_follows_participant_count() {
        let (app, _) = test_app().await;
        let id = create_item(&app, 10, 1.0).await;
        let uri = format!("/api/team-items/{}/price", id);

        let (_, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(body["participants"], 0);
        assert_eq!(body["finalPrice"], 10000);
        assert_eq!(body["item"]["id"], id.as_str());

        join_many(&app, &id, 10).await;

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["participants"], 10);
        assert_eq!(body["finalPrice"], 9900);
    }

    #[tokio::test]
    async fn test_progress() {
        let (app, _) = test_app().await;
        let id = create_item(&app, 10, 1.0).await;
        join_many(&app, &id, 3).await;

        let (status, body) =
            send(&app, "GET", &format!("/api/team-items/{}/progress", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["itemId"], id.as_str());
        assert_eq!(body["participants"], 3);
        assert_eq!(body["currentPrice"], 10000);
        assert_eq!(body["discountPercent"], 0.0);
        assert_eq!(body["toNextStep"], 7);
        assert_eq!(body["progressPercent"], 30);
    }

    #[tokio::test]
    async fn test_update_pricing() {
        let (app, _) = test_app().await;
        let id = create_item(&app, 10, 1.0).await;
        join_many(&app, &id, 2).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/team-items/{}/pricing", id),
            Some(json!({
                "basePrice": 10000,
                "minPrice": 7000,
                "discountStepEvery": 2,
                "discountStepPercent": 3.0,
                "maxDiscountPercent": 30.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["discountStepEvery"], 2);

        let (_, price) = send(&app, "GET", &format!("/api/team-items/{}/price", id), None).await;
        assert_eq!(price["finalPrice"], 9700);
    }

    #[tokio::test]
    async fn test_update_pricing_rejects_out_of_policy_step() {
        let (app, _) = test_app().await;
        let id = create_item(&app, 10, 1.0).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/team-items/{}/pricing", id),
            Some(json!({
                "basePrice": 10000,
                "minPrice": 7000,
                "discountStepEvery": 10,
                "discountStepPercent": 5.0,
                "maxDiscountPercent": 30.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, item) = send(&app, "GET", &format!("/api/team-items/{}", id), None).await;
        assert_eq!(item["discountStepPercent"], 1.0);

        let (status, _) = send(
            &app,
            "PUT",
            "/api/team-items/missing/pricing",
            Some(json!({
                "basePrice": 10000,
                "minPrice": 7000,
                "discountStepEvery": 10,
                "discountStepPercent": 1.0,
                "maxDiscountPercent": 30.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_prices_each_item() {
        let (app, _) = test_app().await;
        let busy = create_item(&app, 2, 1.0).await;
        let quiet = create_item(&app, 10, 1.0).await;
        join_many(&app, &busy, 4).await;

        let (status, body) = send(&app, "GET", "/api/team-items", None).await;
        assert_eq!(status, StatusCode::OK);

        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        let entry = |id: &str| entries.iter().find(|e| e["id"] == id).unwrap().clone();
        assert_eq!(entry(&busy)["participants"], 4);
        assert_eq!(entry(&busy)["currentPrice"], 9800);
        assert_eq!(entry(&busy)["discountPercent"], 2.0);
        assert_eq!(entry(&quiet)["currentPrice"], 10000);

        let (_, limited) = send(&app, "GET", "/api/team-items?limit=1", None).await;
        assert_eq!(limited.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "GET", "/api/team-items?limit=lots", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_limit_is_clamped() {
        let config = ApiConfig {
            list_limit_max: 2,
            ..ApiConfig::default()
        };
        let (app, _) = test_app_with(config).await;
        for _ in 0..3 {
            create_item(&app, 10, 1.0).await;
        }

        let count = |body: Value| body.as_array().unwrap().len();

        let (status, body) = send(&app, "GET", "/api/team-items?limit=0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count(body), 1);

        let (_, body) = send(&app, "GET", "/api/team-items?limit=50", None).await;
        assert_eq!(count(body), 2);

        let (_, body) = send(&app, "GET", "/api/team-items", None).await;
        assert_eq!(count(body), 2);
    }

    #[tokio::test]
    async fn test_delete_closes_item() {
        let (app, _) = test_app().await;
        let id = create_item(&app, 10, 1.0).await;

        let (status, _) = send(&app, "DELETE", &format!("/api/team-items/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, listed) = send(&app, "GET", "/api/team-items", None).await;
        assert!(listed.as_array().unwrap().is_empty());

        let (status, item) = send(&app, "GET", &format!("/api/team-items/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["isActive"], false);

        let (status, _) = send(&app, "DELETE", "/api/team-items/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
