// src/utils/admin_key.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::Config;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Axum Middleware: Admin gate.
///
/// Compares the `x-admin-key` header with the configured shared key.
/// Returns 401 Unauthorized when either is missing or they differ.
pub async fn admin_key_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = config.admin_key.as_deref() else {
        tracing::warn!("Admin route requested but ADMIN_KEY is not configured");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let provided = req
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
