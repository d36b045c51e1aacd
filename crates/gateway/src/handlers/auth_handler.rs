//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use auth_service_lib::{Claims, TokenResponse};
use common::{AppError, AppResult};
use domain::Credentials;

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Token request
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Alias is required"))]
    pub alias: String,
    /// Plaintext secret; an empty secret is allowed and simply won't match
    #[serde(default)]
    pub secret: String,
}

impl From<TokenRequest> for Credentials {
    fn from(request: TokenRequest) -> Self {
        Credentials::new(request.alias, request.secret)
    }
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// Routes that require a verified bearer token
pub fn protected_auth_routes() -> Router<AppState> {
    Router::new().route("/me", get(current_claims))
}

/// Exchange credentials for a bearer token
pub async fn issue_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let credentials = Credentials::from(payload);

    state
        .auth_service
        .authenticate(&credentials)
        .await?
        .map(Json)
        .ok_or(AppError::InvalidCredentials)
}

/// Claims of the presented bearer token
pub async fn current_claims(Extension(claims): Extension<Claims>) -> Json<Claims> {
    Json(claims)
}
