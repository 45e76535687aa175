//! Admin capability middleware.
//!
//! There is deliberately no user or account system here: admin routes are
//! gated by a single static capability key from configuration, presented in
//! the `X-API-Key` header. The check runs before any data access.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::AppState;

/// Middleware for admin-only routes.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req.headers().get("X-API-Key").and_then(|v| v.to_str().ok());

    let provided = match provided {
        Some(key) if !key.is_empty() => key,
        _ => {
            return unauthorized_response("Invalid or missing API key");
        }
    };

    if !shared::crypto::secrets_match(provided, &state.config.security.admin_api_key) {
        return forbidden_response("Admin access required");
    }

    next.run(req).await
}

/// Helper to create unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

/// Helper to create forbidden response.
fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}
