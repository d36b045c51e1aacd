//! Repository behaviour against the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::AppError;
use document_service_lib::repository::CollectionRepository;
use document_service_lib::store::DocumentStore;
use document_service_lib::{
    repository_for, DocumentRepository, MemoryDocumentStore, StatusRepository,
};
use domain::{
    Entity, EntityId, Filter, Outcome, STATUS_CREATED, STATUS_NO_CONTENT, STATUS_NOT_FOUND,
    STATUS_OK,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Customer {
    id: Uuid,
    name: String,
    tier: String,
    address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Address {
    city: String,
}

impl Entity for Customer {
    fn id(&self) -> EntityId {
        self.id
    }
}

fn customer(name: &str, tier: &str, city: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        name: name.to_string(),
        tier: tier.to_string(),
        address: Address {
            city: city.to_string(),
        },
    }
}

fn setup() -> (Arc<MemoryDocumentStore>, CollectionRepository<Customer>) {
    let store = Arc::new(MemoryDocumentStore::new());
    let shared: Arc<dyn DocumentStore> = store.clone();
    let repo = repository_for(shared, "customers").unwrap();
    (store, repo)
}

#[tokio::test]
async fn test_create_get_update_remove_sequence() {
    let (store, repo) = setup();
    let mut alice = customer("alice", "gold", "Lima");

    assert!(repo.create(alice.clone()).await.unwrap().is_ok());
    assert_eq!(repo.get(alice.id).await.unwrap(), Outcome::Ok(alice.clone()));

    alice.tier = "platinum".to_string();
    assert!(repo.update(alice.clone()).await.unwrap().is_ok());
    assert_eq!(
        repo.get(alice.id).await.unwrap().into_value().unwrap().tier,
        "platinum"
    );

    assert!(repo.remove(alice.id).await.unwrap().is_ok());
    assert!(repo.get(alice.id).await.unwrap().is_fail());
    assert!(store.is_empty("customers").unwrap());
}

#[tokio::test]
async fn test_update_missing_id_never_inserts() {
    let (store, repo) = setup();
    let ghost = customer("ghost", "free", "Oslo");

    for _ in 0..2 {
        let outcome = repo.update(ghost.clone()).await.unwrap();
        assert_eq!(outcome.message(), Some("update( record id not found )"));
    }

    assert_eq!(store.len("customers").unwrap(), 0);
}

#[tokio::test]
async fn test_remove_is_idempotent_on_missing_id() {
    let (_, repo) = setup();
    let bob = customer("bob", "free", "Oslo");
    assert!(repo.create(bob.clone()).await.unwrap().is_ok());

    assert!(repo.remove(bob.id).await.unwrap().is_ok());
    assert!(repo.remove(bob.id).await.unwrap().is_fail());
    assert!(repo.remove(bob.id).await.unwrap().is_fail());
}

#[tokio::test]
async fn test_duplicate_create_is_a_conflict() {
    let (store, repo) = setup();
    let carol = customer("carol", "gold", "Quito");
    assert!(repo.create(carol.clone()).await.unwrap().is_ok());

    let result = repo.create(carol).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(store.len("customers").unwrap(), 1);
}

#[tokio::test]
async fn test_get_all_yields_each_entity_exactly_once() {
    let (_, repo) = setup();
    let mut expected = HashSet::new();
    for i in 0..25 {
        let c = customer(&format!("c{}", i), "free", "Lima");
        expected.insert(c.id);
        assert!(repo.create(c).await.unwrap().is_ok());
    }

    let all: Vec<Customer> = repo.get_all(None).try_collect().await.unwrap();
    let ids: HashSet<Uuid> = all.iter().map(|c| c.id).collect();

    assert_eq!(all.len(), 25);
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_filtered_queries_on_nested_fields() {
    let (_, repo) = setup();
    for c in [
        customer("dan", "gold", "Lima"),
        customer("eve", "free", "Lima"),
        customer("fay", "gold", "Cusco"),
    ] {
        assert!(repo.create(c).await.unwrap().is_ok());
    }

    let gold_in_lima = Filter::eq("tier", "gold").and(Filter::eq("address.city", "Lima"));
    let found: Vec<Customer> = repo
        .get_all(Some(gold_in_lima.clone()))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "dan");

    let first = repo.find(&gold_in_lima).await.unwrap();
    assert_eq!(first.into_value().map(|c| c.name), Some("dan".to_string()));

    let nobody = repo.find(&Filter::eq("address.city", "Paris")).await.unwrap();
    assert_eq!(nobody.message(), Some("find( filter - record not found )"));

    let outside_lima: Vec<Customer> = repo
        .get_all(Some(Filter::eq("address.city", "Lima").not()))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(outside_lima.len(), 1);
}

#[tokio::test]
async fn test_status_repository_reports_codes() {
    let (_, repo) = setup();
    let status_repo: StatusRepository<Customer> = StatusRepository::new(repo);
    let gus = customer("gus", "free", "Lima");

    let created = status_repo.create(gus.clone()).await.unwrap();
    assert_eq!(created.status.code, STATUS_CREATED);

    let got = status_repo.get(gus.id).await.unwrap();
    assert_eq!(got.status.code, STATUS_OK);
    assert_eq!(got.value, Some(gus.clone()));

    let listed = status_repo.get_all(None).await.unwrap();
    assert_eq!(listed.status.message, "get_all( returns <1> records )");

    let removed = status_repo.remove(gus.id).await.unwrap();
    assert_eq!(removed.status.code, STATUS_NO_CONTENT);

    let again = status_repo.remove(gus.id).await.unwrap();
    assert_eq!(again.status.code, STATUS_NOT_FOUND);

    let updated = status_repo.update(gus).await.unwrap();
    assert_eq!(updated.status.code, STATUS_NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_status_calls_see_their_own_status() {
    let (_, repo) = setup();
    let status_repo: Arc<StatusRepository<Customer>> = Arc::new(StatusRepository::new(repo));
    let kept = customer("kept", "free", "Lima");
    status_repo.create(kept.clone()).await.unwrap();

    let hit = {
        let r = Arc::clone(&status_repo);
        tokio::spawn(async move { r.get(kept.id).await })
    };
    let miss = {
        let r = Arc::clone(&status_repo);
        tokio::spawn(async move { r.get(Uuid::new_v4()).await })
    };

    assert_eq!(hit.await.unwrap().unwrap().status.code, STATUS_OK);
    assert_eq!(miss.await.unwrap().unwrap().status.code, STATUS_NOT_FOUND);
}
