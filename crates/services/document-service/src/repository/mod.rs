//! Repository layer - typed access to one collection.
//!
//! Two call surfaces over the same store:
//! - [`DocumentRepository`]: explicit [`Outcome`](domain::Outcome) values and
//!   lazy streaming enumeration
//! - [`StatusRepository`]: materialised results paired with an HTTP-style
//!   [`OperationStatus`](domain::OperationStatus) per call

mod document_repository;
mod status_repository;

pub use document_repository::{CollectionRepository, DocumentRepository, EntityStream};
pub use status_repository::{StatusRepository, Tracked, TrackedFault, TrackedResult};
