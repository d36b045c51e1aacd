//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth_routes, protected_auth_routes};
use crate::middleware::auth_middleware;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let auth = auth_routes().merge(protected_auth_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    ));

    Router::new()
        .nest("/auth", auth)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
