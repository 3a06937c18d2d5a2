//! Accumulator for field-rule violations.
//!
//! A [`ValidationOutcome`] collects every violation found for one record
//! instead of stopping at the first. Field rules append to a caller-supplied
//! outcome, so the interactive path and the bulk import path can share the
//! same rules while reporting independently.

use serde::Serialize;
use std::fmt;

/// An ordered list of human-readable violation messages.
///
/// An empty outcome means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationOutcome {
    errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one violation message.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Joins all messages with the given separator.
    pub fn joined(&self, separator: &str) -> String {
        self.errors.join(separator)
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_outcome_is_valid() {
        let outcome = ValidationOutcome::new();
        assert!(outcome.is_valid());
        assert!(outcome.is_empty());
        assert_eq!(outcome.to_string(), "");
    }

    #[test]
    fn test_outcome_keeps_insertion_order() {
        let mut outcome = ValidationOutcome::new();
        outcome.add_error("first");
        outcome.add_error(String::from("second"));

        assert!(!outcome.is_valid());
        assert_eq!(outcome.len(), 2);
        assert_eq!(outcome.errors(), ["first", "second"]);
        assert_eq!(outcome.joined("; "), "first; second");
        assert_eq!(outcome.to_string(), "first\nsecond");
    }
}
