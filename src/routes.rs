// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, content, survey},
    state::AppState,
    utils::admin_key::{ADMIN_KEY_HEADER, admin_key_middleware},
};

/// Assembles the main application router.
///
/// * Mounts content routes and nests the session and admin sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, catalog, sessions, config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static(ADMIN_KEY_HEADER),
        ]);

    let session_routes = Router::new()
        .route("/", post(survey::create_session))
        .route(
            "/{id}",
            get(survey::get_session).delete(survey::abandon_session),
        )
        .route("/{id}/answer", put(survey::answer))
        .route("/{id}/advance", post(survey::advance))
        .route("/{id}/retreat", post(survey::retreat));

    let admin_routes = Router::new()
        .route(
            "/responses",
            get(admin::list_responses).delete(admin::delete_responses),
        )
        .route("/stats", get(admin::response_stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_key_middleware,
        ));

    Router::new()
        .route("/api/languages", get(content::list_languages))
        .route("/api/content/{lang}", get(content::get_content))
        .nest("/api/sessions", session_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
