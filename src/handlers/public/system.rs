use axum::{extract::State, http::Uri, response::Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::favorites::StoreStats;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub favorites: StoreStats,
}

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Favorites API",
            "version": version,
            "description": "Save, list, update and remove favorite charts, insights and audiences",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "login": "POST /login (public - token acquisition)",
                "logout": "POST /logout (protected)",
                "favorites": "/favorites, /favorites/:user_id[/:asset_id] (protected)",
            }
        }
    }))
}

/// GET /health - Liveness plus store counters
pub async fn health(State(state): State<AppState>) -> ApiResult<Health> {
    Ok(ApiResponse::success(Health {
        status: "ok",
        timestamp: Utc::now(),
        favorites: state.store.stats().await,
    }))
}

/// Fallback for unmatched paths, so every error carries the JSON envelope
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::not_found(format!("Route not found: {}", uri.path()))
}
