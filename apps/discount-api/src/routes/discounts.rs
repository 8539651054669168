//! # Discount Routes
//!
//! Catalog CRUD and cart resolution.
//!
//! Bodies use the same camelCase shape as [`Discount`]; `id` may be left
//! out on create (a UUID is assigned) and on update (the path id is used).

use std::collections::BTreeSet;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use discount_core::validation::{validate_discount, validate_update_target};
use discount_core::{Cart, Discount, DiscountType, Money, Resolution, UseType};
use discount_db::generate_discount_id;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/discount", post(create_discount).get(list_discounts))
        .route("/api/discount/apply", post(apply_discount))
        .route(
            "/api/discount/{id}",
            get(get_discount).put(update_discount).delete(delete_discount),
        )
}

// =============================================================================
// Request Bodies
// =============================================================================

/// A discount as sent by clients; `id` is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPayload {
    #[serde(default)]
    pub id: Option<String>,
    pub valid_until: DateTime<Utc>,
    pub use_type: UseType,
    pub discount_type: DiscountType,
    pub value: Decimal,
    #[serde(default)]
    pub items: BTreeSet<String>,
}

impl DiscountPayload {
    fn into_discount(self, id: String) -> Discount {
        Discount {
            id,
            valid_until: self.valid_until,
            use_type: self.use_type,
            discount_type: self.discount_type,
            value: self.value,
            items: self.items,
        }
    }
}

/// Cart submitted to `apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub items: BTreeSet<String>,
    pub price: Money,
}

// =============================================================================
// Handlers
// =============================================================================

async fn create_discount(
    State(state): State<AppState>,
    payload: Result<Json<DiscountPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let id = payload.id.clone().unwrap_or_else(generate_discount_id);
    let discount = payload.into_discount(id);
    validate_discount(&discount)?;

    // Nothing is stored unless the Location header can be built
    let location = HeaderValue::try_from(format!("/api/discount/{}", discount.id)).map_err(|e| {
        error!(id = %discount.id, error = %e, "Unrepresentable Location header");
        ApiError::internal("Discount id cannot be addressed")
    })?;

    state.repository.insert(&discount).await?;
    info!(id = %discount.id, "Discount created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(discount),
    ))
}

async fn list_discounts(State(state): State<AppState>) -> ApiResult<Json<Vec<Discount>>> {
    Ok(Json(state.repository.list_all().await?))
}

async fn get_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Discount>> {
    state
        .repository
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Discount", &id))
}

async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DiscountPayload>, JsonRejection>,
) -> ApiResult<Json<Discount>> {
    let Json(payload) = payload?;

    let body_id = payload.id.clone().unwrap_or_else(|| id.clone());
    let discount = payload.into_discount(body_id);
    validate_update_target(&id, &discount)?;

    state.repository.update(&discount).await?;
    info!(id = %discount.id, "Discount updated");

    Ok(Json(discount))
}

async fn delete_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repository.delete(&id).await?;
    info!(id = %id, "Discount deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_discount(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<Json<Resolution>> {
    let Json(request) = payload?;
    let cart = Cart::new(request.items, request.price)?;

    state
        .engine
        .resolve(&cart)
        .await?
        .map(Json)
        .ok_or_else(ApiError::no_applicable_discount)
}
