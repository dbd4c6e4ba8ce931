use super::error::AppError;
use super::state::AppState;
use crate::core::summary::{BreakdownMode, SummaryResult};
use crate::service::HealthReport;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{Html, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub breakdown: BreakdownMode,
}

/// GET /
pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /health
///
/// Probes the remote rate API.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.service.health().await)
}

/// GET /summary?start=2025-01-01&end=2025-01-10&breakdown=day
///
/// Daily EUR→USD rates with percentage changes and totals for the range.
/// Malformed or missing parameters are rejected with 422.
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SummaryParams>, QueryRejection>,
) -> Result<Json<SummaryResult>, AppError> {
    let Query(params) = params.map_err(|e| AppError::unprocessable(e.body_text()))?;

    let result = state
        .service
        .summary(params.start, params.end, params.breakdown)
        .await?;
    Ok(Json(result))
}
