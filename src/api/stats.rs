//! Statistics endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

/// Library-wide counters
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_books: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub total_members: i64,
    pub active_members: i64,
    pub active_loans: i64,
    pub overdue_loans: i64,
}

/// Get library statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Library statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
