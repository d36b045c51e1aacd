//! In-process document store.
//!
//! Keeps collections in ordered maps behind a lock. Useful for tests and for
//! embedding the repository layer without a database server.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use common::{AppError, AppResult};
use domain::{EntityId, Filter};

use super::{DocumentStore, DocumentStream};

type Collections = HashMap<String, BTreeMap<EntityId, Value>>;

/// Document store held entirely in memory.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`
    pub fn len(&self, collection: &str) -> AppResult<usize> {
        Ok(self
            .read()?
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0))
    }

    pub fn is_empty(&self, collection: &str) -> AppResult<bool> {
        Ok(self.len(collection)? == 0)
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| AppError::store("memory store lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| AppError::store("memory store lock poisoned"))
    }

    fn select(&self, collection: &str, filter: &Filter) -> AppResult<Vec<Value>> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn stream(&self, collection: &str, filter: Filter) -> DocumentStream {
        // Snapshot at call time; later writes are not observed by this stream
        match self.select(collection, &filter) {
            Ok(docs) => stream::iter(docs.into_iter().map(Ok)).boxed(),
            Err(e) => stream::once(async move { Err(e) }).boxed(),
        }
    }

    async fn find_one(&self, collection: &str, filter: &Filter) -> AppResult<Option<Value>> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.values().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find_by_id(&self, collection: &str, id: EntityId) -> AppResult<Option<Value>> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.get(&id).cloned()))
    }

    async fn insert_one(&self, collection: &str, id: EntityId, document: Value) -> AppResult<()> {
        let mut collections = self.write()?;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.contains_key(&id) {
            return Err(AppError::conflict(format!("Document {}", id)));
        }

        docs.insert(id, document);
        Ok(())
    }

    async fn replace_one(
        &self,
        collection: &str,
        id: EntityId,
        document: Value,
    ) -> AppResult<u64> {
        let mut collections = self.write()?;
        match collections.get_mut(collection).and_then(|docs| docs.get_mut(&id)) {
            Some(existing) => {
                *existing = document;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, id: EntityId) -> AppResult<u64> {
        let removed = self
            .write()?
            .get_mut(collection)
            .and_then(|docs| docs.remove(&id));

        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> AppResult<()> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();

        store.insert_one("items", id, json!({"id": id})).await.unwrap();
        let err = store
            .insert_one("items", id, json!({"id": id}))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.len("items").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        let id = Uuid::new_v4();

        store.insert_one("a", id, json!({"id": id})).await.unwrap();

        assert!(store.find_by_id("b", id).await.unwrap().is_none());
        assert_eq!(store.delete_one("b", id).await.unwrap(), 0);
        assert_eq!(store.len("a").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stream_applies_filter() {
        let store = MemoryDocumentStore::new();
        for name in ["x", "y", "x"] {
            let id = Uuid::new_v4();
            store
                .insert_one("items", id, json!({"id": id, "name": name}))
                .await
                .unwrap();
        }

        let docs: Vec<Value> = store
            .stream("items", Filter::eq("name", "x"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_negated_eq_keeps_documents_missing_the_field() {
        let store = MemoryDocumentStore::new();
        let with = Uuid::new_v4();
        let without = Uuid::new_v4();
        store
            .insert_one("items", with, json!({"id": with, "nickname": "x"}))
            .await
            .unwrap();
        store
            .insert_one("items", without, json!({"id": without}))
            .await
            .unwrap();

        let docs: Vec<Value> = store
            .stream("items", Filter::eq("nickname", "x").not())
            .try_collect()
            .await
            .unwrap();

        assert_eq!(docs, vec![json!({"id": without})]);
    }
}
