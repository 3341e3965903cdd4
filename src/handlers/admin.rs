// src/handlers/admin.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{error::AppError, models::response::ResponseStats, state::AppState};

/// Lists every submitted survey, newest first.
/// Admin only.
pub async fn list_responses(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.store.list_all().await?;

    Ok(Json(records))
}

/// Deletes all submitted surveys.
/// Admin only. Not ordered against submissions that are still in flight.
pub async fn delete_responses(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.store.delete_all().await?;
    tracing::info!("Admin cleared {} survey responses", deleted);

    Ok(StatusCode::NO_CONTENT)
}

/// Aggregated counts for the dashboard charts.
///
/// * Records per track label.
/// * Option counts for single choice, Likert and multi choice questions.
/// * Mean rating per rating-matrix row.
///
/// Question types are looked up in the default-language content.
/// Admin only.
pub async fn response_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.store.list_all().await?;
    let content = state.catalog.default_content();

    Ok(Json(ResponseStats::from_records(&records, &content)))
}
