//! Store availability probe.
//!
//! Produces the "is available" signal and round-trip duration consumed by
//! whatever health endpoint the host application exposes.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::store::DocumentStore;

/// Default time to wait for the store before reporting it unavailable
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Result of one availability probe.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub available: bool,
    #[serde(serialize_with = "as_millis")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// "healthy" / "unhealthy"
    pub fn status(&self) -> &'static str {
        if self.available {
            "healthy"
        } else {
            "unhealthy"
        }
    }
}

fn as_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

/// Ping the store, giving up after `timeout`.
pub async fn probe(store: &dyn DocumentStore, timeout: Duration) -> HealthReport {
    let started = Instant::now();
    let result = tokio::time::timeout(timeout, store.ping()).await;
    let duration = started.elapsed();

    let error = match result {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("no answer within {} ms", timeout.as_millis())),
    };

    if let Some(reason) = &error {
        tracing::warn!(reason = %reason, "document store unavailable");
    }

    HealthReport {
        available: error.is_none(),
        duration,
        error,
    }
}
