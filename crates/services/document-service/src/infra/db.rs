//! PostgreSQL connection and schema management for the document store.

use std::collections::HashSet;
use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use super::migrations::Migrator;

/// Seconds to wait for a pooled connection before failing
const CONNECT_TIMEOUT_SECONDS: u64 = 5;

/// Upper bound of pooled connections
const MAX_CONNECTIONS: u32 = 10;

/// Database wrapper for connection management.
///
/// Meant to be created once per process and handed to the store with
/// [`Database::into_connection`]. Reconnection is left to the pool.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and apply pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(database_url).await?;
        Migrator::up(&db.connection, None).await?;
        tracing::info!("Document store migrations applied");
        Ok(db)
    }

    /// Open the pool only (for CLI commands).
    pub async fn connect_without_migrations(database_url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(MAX_CONNECTIONS)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECONDS))
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self { connection })
    }

    /// Give up the wrapper and keep the pool.
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// List every known migration with its applied flag.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect())
    }

    /// Drop everything and re-apply all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }
}
