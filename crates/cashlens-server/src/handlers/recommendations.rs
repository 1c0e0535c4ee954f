//! Recommendation handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use tracing::warn;

use crate::{get_user_id, AppError, AppState};
use cashlens_core::insights::InsightEngine;
use cashlens_core::models::Recommendation;

/// POST /api/recommendations/generate - Build and store a new savings tip
pub async fn generate_recommendation(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Recommendation>, AppError> {
    let user_id = get_user_id(request.headers());
    let engine = InsightEngine::for_database(&state.db, state.config.insights.clone());

    let recommendation = engine.generate_recommendation(&user_id)?;

    // Already committed: an audit failure must not turn this into an error response
    if let Err(e) = state.db.log_audit(
        &user_id,
        "create",
        Some("recommendation"),
        Some(recommendation.id),
        Some(recommendation.tip.kind()),
    ) {
        warn!(error = %e, id = recommendation.id, "Failed to audit recommendation");
    }

    Ok(Json(recommendation))
}

/// GET /api/recommendations - Recommendation history, newest first
pub async fn list_recommendations(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let user_id = get_user_id(request.headers());
    let engine = InsightEngine::for_database(&state.db, state.config.insights.clone());

    let recommendations = engine.list_recommendations(&user_id)?;

    state
        .db
        .log_audit(&user_id, "list", Some("recommendation"), None, None)?;

    Ok(Json(recommendations))
}
