//! Composable document filters.
//!
//! A [`Filter`] is a small boolean expression over document fields. Stores
//! either translate it into their native query form or evaluate it in memory
//! with [`Filter::matches`]. Field paths are dot-separated (`address.city`)
//! and equality is exact JSON equality.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{FIELD_PATH_SEPARATOR, ID_FIELD};
use crate::entity::EntityId;
use crate::error::{DomainError, DomainResult};

/// Boolean predicate selecting documents of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Every document
    #[default]
    All,
    /// Field at `field` equals `value`
    Eq { field: String, value: Value },
    /// Every sub-filter holds (empty is true)
    And(Vec<Filter>),
    /// At least one sub-filter holds (empty is false)
    Or(Vec<Filter>),
    /// Sub-filter does not hold
    Not(Box<Filter>),
}

impl Filter {
    /// Equality on a field path
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Equality on the identifier field
    pub fn by_id(id: EntityId) -> Self {
        Filter::eq(ID_FIELD, id.to_string())
    }

    /// Conjunction, flattening nested `And`s
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, other) => other,
            (this, Filter::All) => this,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), other) => {
                left.push(other);
                Filter::And(left)
            }
            (this, other) => Filter::And(vec![this, other]),
        }
    }

    /// Disjunction, flattening nested `Or`s
    pub fn or(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::Or(mut left), Filter::Or(right)) => {
                left.extend(right);
                Filter::Or(left)
            }
            (Filter::Or(mut left), other) => {
                left.push(other);
                Filter::Or(left)
            }
            (this, other) => Filter::Or(vec![this, other]),
        }
    }

    /// Negation
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        match self {
            Filter::Not(inner) => *inner,
            other => Filter::Not(Box::new(other)),
        }
    }

    /// Evaluate against a JSON document.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => {
                lookup(document, field).is_some_and(|found| found == value)
            }
            Filter::And(filters) => filters.iter().all(|f| f.matches(document)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(document)),
            Filter::Not(inner) => !inner.matches(document),
        }
    }

    /// Reject empty field paths or path segments.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Filter::All => Ok(()),
            Filter::Eq { field, .. } => {
                if field.is_empty() || field.split(FIELD_PATH_SEPARATOR).any(str::is_empty) {
                    return Err(DomainError::validation(format!(
                        "invalid filter field path '{}'",
                        field
                    )));
                }
                Ok(())
            }
            Filter::And(filters) | Filter::Or(filters) => {
                filters.iter().try_for_each(Filter::validate)
            }
            Filter::Not(inner) => inner.validate(),
        }
    }
}

/// Split a field path into its segments.
pub fn path_segments(field: &str) -> impl Iterator<Item = &str> {
    field.split(FIELD_PATH_SEPARATOR)
}

fn lookup<'a>(document: &'a Value, field: &str) -> Option<&'a Value> {
    path_segments(field).try_fold(document, |current, segment| current.get(segment))
}
