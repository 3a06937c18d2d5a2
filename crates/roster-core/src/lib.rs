//! # Roster Core
//!
//! Core types shared by every crate in the student roster workspace.
//!
//! - [`errors`]: The error taxonomy returned by services and storage adapters
//! - [`validation`]: The [`ValidationOutcome`] accumulator filled by field rules
//!
//! # Example
//!
//! ```ignore
//! use roster_core::{RosterError, ValidationOutcome};
//!
//! let mut outcome = ValidationOutcome::new();
//! outcome.add_error("Programme is required.");
//! assert!(!outcome.is_valid());
//!
//! let error = RosterError::not_found("S001");
//! ```

pub mod errors;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{Result, RosterError};
pub use validation::ValidationOutcome;
