//! Authentication-related handlers

use axum::extract::Request;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{get_user_id, AppState, API_KEY_USER, LOCAL_DEV_USER, USER_HEADER};

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    /// The authenticated user's identifier
    pub user: String,
    /// How the user was authenticated
    pub auth_method: String,
}

/// Get the currently authenticated user
pub async fn get_me(State(state): State<Arc<AppState>>, request: Request) -> Json<MeResponse> {
    let headers = request.headers();
    let user = get_user_id(headers);

    let auth_method = if headers.contains_key(USER_HEADER) && user != LOCAL_DEV_USER {
        "header"
    } else if user == API_KEY_USER {
        "api_key"
    } else if !state.config.require_auth {
        "none"
    } else {
        "unknown"
    };

    Json(MeResponse {
        user,
        auth_method: auth_method.to_string(),
    })
}
