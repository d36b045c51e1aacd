//! API Gateway Library
//!
//! HTTP surface for token issuance: credentials in, short-lived bearer
//! token out, plus a bearer-protected endpoint echoing verified claims.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use auth_service_lib::Authenticator;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;

    let auth_service = Arc::new(Authenticator::new(config.token.clone()));
    let app = create_router(AppState::new(auth_service));

    let addr: SocketAddr = config.service.server_addr().parse()?;
    info!(service = %config.service.service_name, "Gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
