//! Alias/secret pair presented by a caller.

use serde::Deserialize;

/// Credentials submitted for authentication.
///
/// Never persisted; the secret is kept out of `Debug` output.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub alias: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(alias: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("alias", &self.alias)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
