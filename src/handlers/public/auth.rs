use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::auth::IssuedToken;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user_id: String,
}

/// POST /login - Issue a bearer token for a user id
///
/// Expected Input:
/// ```json
/// { "user_id": "123" }
/// ```
///
/// Expected Output:
/// ```json
/// {
///   "success": true,
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "token_type": "Bearer",
///     "expires_at": "2025-01-01T01:00:00Z"
///   }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<IssuedToken> {
    let Json(request) = payload?;
    let issued = state.auth.issue_credential(request.user_id.trim())?;

    tracing::info!(
        user_id = %request.user_id.trim(),
        policy = ?state.auth.policy(),
        "Issued bearer token"
    );
    Ok(ApiResponse::success(issued))
}
