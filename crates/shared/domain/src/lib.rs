//! Domain layer - Entity contract, filters and outcome types.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! It is shared by the repository layer, the auth service and the gateway.

pub mod constants;
pub mod credentials;
pub mod entity;
pub mod error;
pub mod filter;
pub mod outcome;
pub mod status;

pub use constants::*;
pub use credentials::Credentials;
pub use entity::{Entity, EntityId};
pub use error::{DomainError, DomainResult};
pub use filter::Filter;
pub use outcome::Outcome;
pub use status::OperationStatus;
