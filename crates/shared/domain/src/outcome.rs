//! Explicit success/failure value for expected business outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of a repository operation that completed without a fault.
///
/// `Fail` carries a human-readable message and is used for expected
/// negatives such as "record not found". Infrastructure failures are never
/// represented here; they travel as `Err` on the surrounding `Result`.
///
/// `Outcome<()>` is the value-less form used by deletions.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Outcome<V = ()> {
    Ok(V),
    Fail(String),
}

impl<V> Outcome<V> {
    /// Create a failed outcome
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Fail(message.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    /// Borrow the value, if any
    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Fail(_) => None,
        }
    }

    /// Consume and return the value, if any
    pub fn into_value(self) -> Option<V> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Fail(_) => None,
        }
    }

    /// Failure message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Fail(message) => Some(message),
        }
    }

    /// Transform the success value
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Fail(message) => Outcome::Fail(message),
        }
    }

    /// Convert into a standard `Result`, failure message as error
    pub fn into_result(self) -> Result<V, String> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Fail(message) => Err(message),
        }
    }
}

impl Outcome<()> {
    /// Successful outcome without payload
    pub fn done() -> Self {
        Outcome::Ok(())
    }
}

impl<V> From<Option<V>> for Outcome<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Outcome::Ok(value),
            None => Outcome::fail("record not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_exposes_value() {
        let outcome = Outcome::Ok(7);
        assert!(outcome.is_ok());
        assert_eq!(outcome.value(), Some(&7));
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn test_fail_exposes_message() {
        let outcome: Outcome<i32> = Outcome::fail("missing");
        assert!(outcome.is_fail());
        assert_eq!(outcome.message(), Some("missing"));
        assert_eq!(outcome.into_result(), Err("missing".to_string()));
    }

    #[test]
    fn test_map_keeps_failure() {
        let outcome: Outcome<i32> = Outcome::fail("gone");
        assert_eq!(outcome.map(|v| v * 2), Outcome::fail("gone"));
        assert_eq!(Outcome::Ok(2).map(|v| v * 2), Outcome::Ok(4));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Outcome::from(Some("a")), Outcome::Ok("a"));
        assert!(Outcome::<&str>::from(None).is_fail());
    }
}
