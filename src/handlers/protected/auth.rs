use axum::extract::{Extension, State};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;

/// POST /logout - Revoke the bearer token used for this request
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Message> {
    if !state.auth.revoke(&user) {
        // Revoked concurrently between authentication and now
        return Err(ApiError::unauthorized("Token invalidated"));
    }

    tracing::info!(user_id = %user.user_id, token_id = %user.token_id, "Revoked bearer token");
    Ok(ApiResponse::message("Logged out"))
}
