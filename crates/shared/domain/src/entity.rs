//! Entity contract for documents managed by a repository.

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// Globally unique document identifier.
pub type EntityId = Uuid;

/// A record persisted as one document in a collection.
///
/// The identifier is exposed read-only: repositories locate documents by it
/// and never rewrite it. The remaining fields are opaque to the repository
/// and travel through serde.
///
/// The nil UUID marks an absent entity and is rejected on creation.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier of this entity
    fn id(&self) -> EntityId;

    /// Check whether the entity carries a usable identifier
    fn has_identity(&self) -> bool {
        !self.id().is_nil()
    }
}
