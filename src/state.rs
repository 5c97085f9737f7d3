//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::{AuthError, AuthGate};
use crate::config::SecurityConfig;
use crate::favorites::FavoritesStore;

/// Shared application state, built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    /// Every user's favorites.
    pub store: Arc<FavoritesStore>,
    /// Bearer token issuance and validation.
    pub auth: Arc<AuthGate>,
    /// Reject requests that touch another user's favorites.
    pub enforce_ownership: bool,
}

impl AppState {
    /// Creates a state with an empty store and a fresh token registry.
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        Ok(Self {
            store: Arc::new(FavoritesStore::new()),
            auth: Arc::new(AuthGate::new(security)?),
            enforce_ownership: security.enforce_ownership,
        })
    }
}
