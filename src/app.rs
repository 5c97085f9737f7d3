use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{protected, public};
use crate::middleware::require_bearer;
use crate::state::AppState;

/// Full application: routes plus the config-driven global layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = router(state).layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

/// Route table without global layers
pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login", post(public::login))
        // Protected
        .merge(protected_routes(state.clone()))
        .fallback(public::not_found)
        .with_state(state)
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::favorites;

    Router::new()
        .route("/logout", post(protected::logout))
        .route("/favorites", post(favorites::add_favorite))
        .route("/favorites/:user_id", get(favorites::list_favorites))
        .route(
            "/favorites/:user_id/:asset_id",
            get(favorites::get_favorite)
                .put(favorites::edit_favorite)
                .delete(favorites::remove_favorite),
        )
        .route_layer(from_fn_with_state(state, require_bearer))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
