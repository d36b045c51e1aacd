//! Status-reporting repository.
//!
//! Every call returns an [`OperationStatus`] (200 read, 201 created, 204
//! updated/deleted, 404 not found, 500 store fault) together with its value.
//! The status travels with the call result, so concurrent callers sharing
//! one repository each see their own.

use std::marker::PhantomData;

use futures::TryStreamExt;
use thiserror::Error;
use tracing::error;

use common::AppError;
use domain::{Entity, EntityId, Filter, OperationStatus, Outcome};

use super::document_repository::{CollectionRepository, DocumentRepository};

/// Value of a completed call plus its status.
#[derive(Debug, Clone, PartialEq)]
pub struct Tracked<V> {
    pub status: OperationStatus,
    pub value: V,
}

impl<V> Tracked<V> {
    fn new(status: OperationStatus, value: V) -> Self {
        Self { status, value }
    }
}

/// A call that ended in a fault. Store faults carry status 500; faults raised
/// before touching the store leave the status unset.
#[derive(Debug, Error)]
#[error("{}", .status.message)]
pub struct TrackedFault {
    pub status: OperationStatus,
    #[source]
    pub error: AppError,
}

impl From<TrackedFault> for AppError {
    fn from(fault: TrackedFault) -> Self {
        fault.error
    }
}

/// Result alias for status-reporting calls
pub type TrackedResult<V> = Result<Tracked<V>, TrackedFault>;

/// Wraps a [`DocumentRepository`] and reports a status for every call.
pub struct StatusRepository<T, R = CollectionRepository<T>> {
    inner: R,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> StatusRepository<T, R>
where
    T: Entity,
    R: DocumentRepository<T>,
{
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            _entity: PhantomData,
        }
    }

    /// Every entity selected by `filter` (`None` selects all), materialised.
    pub async fn get_all(&self, filter: Option<Filter>) -> TrackedResult<Vec<T>> {
        let records: Vec<T> = self
            .inner
            .get_all(filter)
            .try_collect()
            .await
            .map_err(|e| fault("get_all", e))?;

        let status = OperationStatus::ok(format!("get_all( returns <{}> records )", records.len()));
        Ok(Tracked::new(status, records))
    }

    /// Entity with the given identifier; `None` with 404 when absent.
    pub async fn get(&self, id: EntityId) -> TrackedResult<Option<T>> {
        let outcome = self.inner.get(id).await.map_err(|e| fault("get", e))?;
        Ok(found_or_not(
            outcome,
            format!("get( returns: record with id <{}> doesn't exist )", id),
        ))
    }

    /// First entity selected by `filter`; `None` with 404 when none match.
    pub async fn find(&self, filter: &Filter) -> TrackedResult<Option<T>> {
        let outcome = self.inner.find(filter).await.map_err(|e| fault("find", e))?;
        Ok(found_or_not(
            outcome,
            "find( returns: record with that criteria doesn't exist )".to_string(),
        ))
    }

    pub async fn create(&self, entity: T) -> TrackedResult<()> {
        let outcome = self
            .inner
            .create(entity)
            .await
            .map_err(|e| fault("create", e))?;

        let status = match outcome {
            Outcome::Ok(_) => {
                OperationStatus::created("create( returns: record has been created )")
            }
            Outcome::Fail(message) => OperationStatus::internal_error(message),
        };
        Ok(Tracked::new(status, ()))
    }

    pub async fn update(&self, entity: T) -> TrackedResult<()> {
        let outcome = self
            .inner
            .update(entity)
            .await
            .map_err(|e| fault("update", e))?;

        let status = match outcome {
            Outcome::Ok(_) => {
                OperationStatus::no_content("update( returns: record has been updated )")
            }
            Outcome::Fail(_) => {
                OperationStatus::not_found("update( returns: record to update doesn't exist )")
            }
        };
        Ok(Tracked::new(status, ()))
    }

    pub async fn remove(&self, id: EntityId) -> TrackedResult<()> {
        let outcome = self.inner.remove(id).await.map_err(|e| fault("remove", e))?;

        let status = match outcome {
            Outcome::Ok(_) => {
                OperationStatus::no_content("remove( returns: record has been deleted )")
            }
            Outcome::Fail(_) => {
                OperationStatus::not_found("remove( returns: record to delete doesn't exist )")
            }
        };
        Ok(Tracked::new(status, ()))
    }
}

fn found_or_not<T>(outcome: Outcome<T>, missing: String) -> Tracked<Option<T>> {
    match outcome {
        Outcome::Ok(record) => Tracked::new(
            OperationStatus::ok("returns: successful answer"),
            Some(record),
        ),
        Outcome::Fail(_) => Tracked::new(OperationStatus::not_found(missing), None),
    }
}

fn fault(operation: &str, err: AppError) -> TrackedFault {
    let status = match err {
        AppError::Precondition(_) | AppError::Validation(_) => OperationStatus::default(),
        _ => {
            error!(operation, error = ?err, "document store fault");
            OperationStatus::internal_error(format!("{}( thrown an error: <{}> )", operation, err))
        }
    };

    TrackedFault { status, error: err }
}
