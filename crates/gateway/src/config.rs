//! Gateway configuration.

use common::{AppResult, LogLevel, ServiceConfig, StoreSettings, TokenSettings};

/// Everything the gateway binds from its configuration source.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub service: ServiceConfig,
    pub store: StoreSettings,
    pub token: TokenSettings,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(),
            store: StoreSettings::from_env(),
            token: TokenSettings::from_env(),
        }
    }

    /// Log level from the service section, `Information` when unparseable.
    pub fn log_level(&self) -> LogLevel {
        self.service.log_level.parse().unwrap_or_default()
    }

    /// Token settings must hold before serving; store settings are checked
    /// by whichever command connects to the store.
    pub fn validate(&self) -> AppResult<()> {
        self.token.validate()
    }
}
