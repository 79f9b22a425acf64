//! Endpoints polled by the n8n workflow to match activities by country and
//! city.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::{error::ApiError, models::LocationFilters, AppState};

const PRODUCTS_FAILED: &str = "Error fetching products";
const CITIES_FAILED: &str = "Error fetching cities";

type ApiResult = Result<(StatusCode, Json<serde_json::Value>), ApiError>;

// ── GET /api/automate/products/list ───────────────────────────────────────────

/// Plain listing, or the filtered listing as soon as `country` or `city` is in
/// the query string.
pub async fn products_list(state: State<AppState>, query: RawQuery) -> ApiResult {
    if LocationFilters::from_query(query.0.as_deref()).is_empty() {
        list_products(state).await
    } else {
        list_products_by_country(state, query).await
    }
}

pub async fn list_products(State(state): State<AppState>) -> ApiResult {
    let start = Instant::now();
    let products = state
        .catalog
        .list_products()
        .await
        .map_err(|e| e.with_message(PRODUCTS_FAILED))?;

    info!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": "Products retrieved successfully",
            "count": products.len(),
            "data": products,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        })),
    ))
}

// ── GET /api/automate/products/by-country ─────────────────────────────────────

// Envelope carries no `message`/`timestamp`; existing clients depend on it.
pub async fn list_products_by_country(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult {
    let start = Instant::now();
    let filters = LocationFilters::from_query(query.as_deref());
    let country = filters.country.clone();
    let city = filters.city.clone();
    let products = state
        .catalog
        .list_products_by_location(filters)
        .await
        .map_err(|e| e.with_message(PRODUCTS_FAILED))?;

    info!(
        country = ?country,
        city = ?city,
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products by location"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "count": products.len(),
            "data": products,
        })),
    ))
}

// ── GET /api/automate/products/cities ─────────────────────────────────────────

pub async fn cities_by_country(State(state): State<AppState>) -> ApiResult {
    let start = Instant::now();
    let cities = state
        .catalog
        .cities_by_country()
        .await
        .map_err(|e| e.with_message(CITIES_FAILED))?;

    info!(
        countries = cities.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed cities by country"
    );

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "total_countries": cities.len(),
            "data": cities,
        })),
    ))
}
