use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::favorites::{Asset, FavoriteAsset};
use crate::middleware::{ensure_owner, ApiResponse, ApiResult, Message};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub user_id: String,
    /// Raw asset payload, decoded by its `type` discriminator
    #[serde(default)]
    pub asset: Value,
}

/// POST /favorites - Add an asset to a user's favorites
///
/// Expected Input:
/// ```json
/// {
///   "user_id": "123",
///   "asset": {
///     "id": "1",
///     "type": "chart",
///     "description": "Stock trends",
///     "title": "Tech",
///     "axes_titles": ["Time", "Price"],
///     "data": [3500, 3600]
///   }
/// }
/// ```
///
/// The user's collection is created on first add. A second asset with the
/// same id is rejected with 409.
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AddFavoriteRequest>, JsonRejection>,
) -> ApiResult<Message> {
    let Json(request) = payload?;

    if request.user_id.is_empty() {
        return Err(ApiError::field_error("user_id", "User ID is required"));
    }
    ensure_owner(&state, &user, &request.user_id)?;

    let asset = Asset::from_value(request.asset)?;
    if asset.id().is_empty() {
        return Err(ApiError::field_error("asset.id", "Asset ID is required"));
    }

    let (asset_id, kind) = (asset.id().to_string(), asset.kind());
    state.store.add_favorite(&request.user_id, asset).await.map_err(|e| {
        tracing::info!(user_id = %request.user_id, %asset_id, "Rejected duplicate favorite");
        ApiError::from(e)
    })?;

    tracing::info!(user_id = %request.user_id, %asset_id, %kind, "Added favorite");
    Ok(ApiResponse::message("Asset added to favorites"))
}
