//! Generic document repository with explicit outcomes.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{Entity, EntityId, Filter, Outcome};

use crate::store::DocumentStore;

/// Lazy, non-restartable stream of entities. `Err` items are store faults.
pub type EntityStream<T> = BoxStream<'static, AppResult<T>>;

/// Repository trait for dependency injection.
///
/// Expected negatives ("not found") come back as [`Outcome::Fail`]; only
/// store faults and precondition violations are `Err`.
#[async_trait]
pub trait DocumentRepository<T: Entity>: Send + Sync {
    /// Stream every entity selected by `filter` (`None` selects all)
    fn get_all(&self, filter: Option<Filter>) -> EntityStream<T>;

    /// Entity with the given identifier
    async fn get(&self, id: EntityId) -> AppResult<Outcome<T>>;

    /// First entity selected by `filter`; which one wins among several
    /// matches is up to the store
    async fn find(&self, filter: &Filter) -> AppResult<Outcome<T>>;

    /// Insert a new entity
    async fn create(&self, entity: T) -> AppResult<Outcome<T>>;

    /// Replace the stored entity sharing this entity's identifier
    async fn update(&self, entity: T) -> AppResult<Outcome<T>>;

    /// Delete the entity with the given identifier
    async fn remove(&self, id: EntityId) -> AppResult<Outcome>;
}

/// Concrete implementation of DocumentRepository bound to one collection.
pub struct CollectionRepository<T> {
    store: Arc<dyn DocumentStore>,
    collection: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> CollectionRepository<T> {
    /// Create new repository instance
    ///
    /// # Errors
    /// Precondition error if `collection` is empty.
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> AppResult<Self> {
        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(AppError::precondition("collection name must not be empty"));
        }

        Ok(Self {
            store,
            collection,
            _entity: PhantomData,
        })
    }

    /// Name of the bound collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn decode(document: Value) -> AppResult<T> {
        serde_json::from_value(document).map_err(AppError::from)
    }

    fn encode(entity: &T) -> AppResult<Value> {
        serde_json::to_value(entity).map_err(AppError::from)
    }
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> DocumentRepository<T> for CollectionRepository<T> {
    fn get_all(&self, filter: Option<Filter>) -> EntityStream<T> {
        let filter = filter.unwrap_or_default();
        debug!(collection = %self.collection, ?filter, "get_all");

        if let Err(e) = filter.validate() {
            let err = AppError::from(e);
            return stream::once(async move { Err(err) }).boxed();
        }

        self.store
            .stream(&self.collection, filter)
            .map(|document| document.and_then(Self::decode))
            .boxed()
    }

    async fn get(&self, id: EntityId) -> AppResult<Outcome<T>> {
        match self.store.find_by_id(&self.collection, id).await? {
            Some(document) => Ok(Outcome::Ok(Self::decode(document)?)),
            None => {
                debug!(collection = %self.collection, %id, "get: record id not found");
                Ok(Outcome::fail("get( record id not found )"))
            }
        }
    }

    async fn find(&self, filter: &Filter) -> AppResult<Outcome<T>> {
        filter.validate()?;

        match self.store.find_one(&self.collection, filter).await? {
            Some(document) => Ok(Outcome::Ok(Self::decode(document)?)),
            None => Ok(Outcome::fail("find( filter - record not found )")),
        }
    }

    async fn create(&self, entity: T) -> AppResult<Outcome<T>> {
        if !entity.has_identity() {
            warn!(collection = %self.collection, "create rejected: entity has no identifier");
            return Err(AppError::precondition("entity must carry an identifier"));
        }

        let id = entity.id();
        self.store
            .insert_one(&self.collection, id, Self::encode(&entity)?)
            .await?;

        debug!(collection = %self.collection, %id, "create: record created");
        Ok(Outcome::Ok(entity))
    }

    async fn update(&self, entity: T) -> AppResult<Outcome<T>> {
        let id = entity.id();
        let matched = self
            .store
            .replace_one(&self.collection, id, Self::encode(&entity)?)
            .await?;

        if matched == 0 {
            debug!(collection = %self.collection, %id, "update: record id not found");
            return Ok(Outcome::fail("update( record id not found )"));
        }

        Ok(Outcome::Ok(entity))
    }

    async fn remove(&self, id: EntityId) -> AppResult<Outcome> {
        let deleted = self.store.delete_one(&self.collection, id).await?;

        if deleted == 0 {
            debug!(collection = %self.collection, %id, "remove: record id not found");
            return Ok(Outcome::fail("remove( record id not found )"));
        }

        Ok(Outcome::done())
    }
}
