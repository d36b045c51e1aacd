//! Store layer - backend abstraction over a document database.
//!
//! A [`DocumentStore`] knows nothing about entity types: it moves JSON
//! documents in and out of named collections and evaluates [`Filter`]s.
//! Repositories sit on top and add typing and outcome semantics.

pub mod entities;
mod memory;
mod postgres;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use common::AppResult;
use domain::{EntityId, Filter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Lazy stream of raw documents. Errors are store faults raised mid-stream.
pub type DocumentStream = BoxStream<'static, AppResult<Value>>;

/// Backend trait for dependency injection.
///
/// Implementations are shared across tasks and must be safe for concurrent
/// use. Every write targets exactly one document keyed by `(collection, id)`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stream the documents of `collection` selected by `filter`.
    ///
    /// Nothing is fetched until the stream is polled.
    fn stream(&self, collection: &str, filter: Filter) -> DocumentStream;

    /// First document selected by `filter`, in store order
    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>>;

    /// Document with the given identifier
    async fn find_by_id(&self, collection: &str, id: EntityId) -> AppResult<Option<Value>>;

    /// Insert a new document. Duplicate identifiers are rejected by the store.
    async fn insert_one(&self, collection: &str, id: EntityId, document: Value) -> AppResult<()>;

    /// Replace the whole document with the given identifier, never inserting.
    /// Returns the number of documents matched (0 or 1).
    async fn replace_one(&self, collection: &str, id: EntityId, document: Value)
        -> AppResult<u64>;

    /// Delete the document with the given identifier.
    /// Returns the number of documents deleted (0 or 1).
    async fn delete_one(&self, collection: &str, id: EntityId) -> AppResult<u64>;

    /// Round-trip to the store to check availability
    async fn ping(&self) -> AppResult<()>;
}
