//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use common::{AppError, AppResult};
use domain::BEARER_TOKEN_PREFIX;

use crate::state::AppState;

/// Authentication middleware that validates bearer tokens.
///
/// Verified [`Claims`](auth_service_lib::Claims) are inserted into the
/// request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;

    let claims = state.auth_service.verify_token(token).map_err(|e| {
        debug!(error = %e, "Bearer token rejected");
        AppError::Unauthorized
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
