use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Bearer token middleware: validates the token through the auth gate and
/// injects the resolved [`AuthUser`] into request extensions
pub async fn require_bearer(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract token from Authorization header
    let token = extract_bearer_token(&headers).map_err(|msg| {
        tracing::warn!(path = %request.uri().path(), "Rejected request: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let auth_user = state.auth.authenticate(token).map_err(|e| {
        tracing::warn!(path = %request.uri().path(), "Rejected token: {}", e);
        ApiError::from(e)
    })?;

    tracing::debug!(user_id = %auth_user.user_id, "Authenticated request");
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Authorization header missing")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty bearer token"),
        None => Err("Authorization header must use Bearer token format"),
    }
}

/// The authenticated user must be the owner of the favorites being touched
pub fn ensure_owner(state: &AppState, user: &AuthUser, user_id: &str) -> Result<(), ApiError> {
    if state.enforce_ownership && user.user_id != user_id {
        tracing::warn!(
            authenticated = %user.user_id,
            target = %user_id,
            "Rejected access to another user's favorites"
        );
        return Err(ApiError::forbidden("Cannot access another user's favorites"));
    }
    Ok(())
}
