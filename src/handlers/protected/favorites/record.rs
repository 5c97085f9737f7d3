use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::favorites::Asset;
use crate::middleware::{ensure_owner, ApiResponse, ApiResult, Message};
use crate::state::AppState;

use super::utils::{ensure_asset_exists, require_ids};

#[derive(Debug, Deserialize)]
pub struct EditFavoriteRequest {
    #[serde(default)]
    pub new_description: String,
}

/// GET /favorites/:user_id/:asset_id - Fetch a single favorite
pub async fn get_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, asset_id)): Path<(String, String)>,
) -> ApiResult<Asset> {
    require_ids(&user_id, &asset_id)?;
    ensure_owner(&state, &user, &user_id)?;

    if !state.store.user_exists(&user_id).await {
        return Err(ApiError::not_found("User not found"));
    }
    let asset = state
        .store
        .get_favorite(&user_id, &asset_id)
        .await
        .ok_or_else(|| ApiError::not_found("Asset not found"))?;

    Ok(ApiResponse::success(asset))
}

/// DELETE /favorites/:user_id/:asset_id - Remove a favorite
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, asset_id)): Path<(String, String)>,
) -> ApiResult<Message> {
    require_ids(&user_id, &asset_id)?;
    ensure_owner(&state, &user, &user_id)?;
    ensure_asset_exists(&state.store, &user_id, &asset_id).await?;

    // A concurrent delete may win between the probe and the removal
    if state.store.remove_favorite(&user_id, &asset_id).await.is_none() {
        return Err(ApiError::not_found("Asset not found"));
    }

    tracing::info!(%user_id, %asset_id, "Removed favorite");
    Ok(ApiResponse::message("Asset removed"))
}

/// PUT /favorites/:user_id/:asset_id - Replace a favorite's description
///
/// Expected Input:
/// ```json
/// { "new_description": "Updated" }
/// ```
pub async fn edit_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((user_id, asset_id)): Path<(String, String)>,
    payload: Result<Json<EditFavoriteRequest>, JsonRejection>,
) -> ApiResult<Message> {
    require_ids(&user_id, &asset_id)?;
    let Json(request) = payload?;
    if request.new_description.is_empty() {
        return Err(ApiError::field_error("new_description", "New description cannot be empty"));
    }

    ensure_owner(&state, &user, &user_id)?;
    ensure_asset_exists(&state.store, &user_id, &asset_id).await?;

    if !state
        .store
        .edit_favorite(&user_id, &asset_id, &request.new_description)
        .await
    {
        return Err(ApiError::not_found("Asset not found"));
    }

    tracing::info!(%user_id, %asset_id, "Updated favorite description");
    Ok(ApiResponse::message("Asset updated"))
}
