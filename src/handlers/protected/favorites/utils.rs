use crate::error::ApiError;
use crate::favorites::FavoritesStore;

/// Reject empty path or body identifiers before any store access
pub fn require_ids(user_id: &str, asset_id: &str) -> Result<(), ApiError> {
    if user_id.is_empty() || asset_id.is_empty() {
        return Err(ApiError::bad_request("User ID and Asset ID are required"));
    }
    Ok(())
}

/// Distinguish an unknown user from an unknown asset so mutations never
/// confuse "not found" with a silent no-op
pub async fn ensure_asset_exists(
    store: &FavoritesStore,
    user_id: &str,
    asset_id: &str,
) -> Result<(), ApiError> {
    if !store.user_exists(user_id).await {
        return Err(ApiError::not_found("User not found"));
    }
    if !store.asset_exists(user_id, asset_id).await {
        return Err(ApiError::not_found("Asset not found"));
    }
    Ok(())
}
