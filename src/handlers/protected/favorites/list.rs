use axum::extract::{Extension, Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::favorites::{Asset, AssetKind};
use crate::middleware::{ensure_owner, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Optional kind filter: chart, insight or audience
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesList {
    pub favorites: Vec<Asset>,
}

/// GET /favorites/:user_id[?type=kind] - List a user's favorites in the order
/// they were added. Unknown users have an empty list.
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<FavoritesList> {
    if user_id.is_empty() {
        return Err(ApiError::field_error("user_id", "User ID is required"));
    }
    ensure_owner(&state, &user, &user_id)?;

    let favorites = match query.kind.as_deref() {
        Some(raw) => {
            let kind = raw
                .parse::<AssetKind>()
                .map_err(|e| ApiError::field_error("type", e.to_string()))?;
            state.store.get_favorites_by_kind(&user_id, kind).await
        }
        None => state.store.get_favorites(&user_id).await,
    };

    tracing::debug!(%user_id, count = favorites.len(), "Listed favorites");
    Ok(ApiResponse::success(FavoritesList { favorites }))
}
