//! Document Service Library
//!
//! Typed CRUD and query access to named collections of a document store.
//!
//! - [`store`]: backend abstraction plus PostgreSQL (JSONB) and in-memory backends
//! - [`repository`]: the generic repository over an [`Entity`](domain::Entity)
//! - [`infra`]: connection management and migrations
//! - [`health`]: store availability probe

pub mod health;
pub mod infra;
pub mod repository;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use common::{AppResult, StoreSettings};
use domain::Entity;

use crate::infra::Database;
use crate::repository::CollectionRepository;
use crate::store::{DocumentStore, PgDocumentStore};

pub use health::{probe, HealthReport, DEFAULT_PROBE_TIMEOUT};
pub use repository::{DocumentRepository, EntityStream, StatusRepository};
pub use store::MemoryDocumentStore;

/// Connect to the store described by `settings`, applying pending migrations.
pub async fn connect_store(settings: &StoreSettings) -> AppResult<Arc<dyn DocumentStore>> {
    settings.validate()?;
    let db = Database::connect(&settings.connection_string()).await?;
    info!(host = %settings.host, database = %settings.service_name, "Document store connected");
    Ok(Arc::new(PgDocumentStore::new(db.into_connection())))
}

/// Connect without touching the schema and report store availability.
pub async fn check_store(settings: &StoreSettings, timeout: Duration) -> AppResult<HealthReport> {
    settings.validate()?;
    let db = Database::connect_without_migrations(&settings.connection_string()).await?;
    let store = PgDocumentStore::new(db.into_connection());
    Ok(probe(&store, timeout).await)
}

/// Build a repository for `T` bound to `collection` on a shared store.
pub fn repository_for<T: Entity>(
    store: Arc<dyn DocumentStore>,
    collection: &str,
) -> AppResult<CollectionRepository<T>> {
    CollectionRepository::new(store, collection)
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    settings: &StoreSettings,
    action: MigrateAction,
) -> AppResult<Vec<(String, bool)>> {
    settings.validate()?;
    let db = Database::connect_without_migrations(&settings.connection_string()).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => return Ok(db.migration_status().await?),
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(Vec::new())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
