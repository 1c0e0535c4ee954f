//! Forecast and anomaly handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::{get_user_id, AppError, AppState};
use cashlens_core::insights::{AnomalyFinding, ForecastPoint, InsightEngine};

#[derive(Serialize)]
pub struct ForecastResponse {
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Serialize)]
pub struct AnomaliesResponse {
    pub anomalies: Vec<AnomalyFinding>,
}

/// GET /api/analytics/forecast - 14 days of history plus a 7-day projection
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ForecastResponse>, AppError> {
    let user_id = get_user_id(request.headers());
    let engine = InsightEngine::for_database(&state.db, state.config.insights.clone());

    let forecast = engine.forecast(&user_id, Utc::now())?;

    state
        .db
        .log_audit(&user_id, "view", Some("forecast"), None, None)?;

    Ok(Json(ForecastResponse { forecast }))
}

/// GET /api/analytics/anomalies - Flagged transactions from the last 60 days
pub async fn get_anomalies(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AnomaliesResponse>, AppError> {
    let user_id = get_user_id(request.headers());
    let engine = InsightEngine::for_database(&state.db, state.config.insights.clone());

    let anomalies = engine.anomalies(&user_id, Utc::now())?;

    state.db.log_audit(
        &user_id,
        "view",
        Some("anomalies"),
        None,
        Some(&format!("count={}", anomalies.len())),
    )?;

    Ok(Json(AnomaliesResponse { anomalies }))
}
