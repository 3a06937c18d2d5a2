//! # Roster Models
//!
//! Domain models for the student roster.
//!
//! # Modules
//!
//! - [`students`]: The student record, its status and query filters
//! - [`reports`]: Aggregate report values (GPA bands, programme summaries)
//!
//! # Example
//!
//! ```ignore
//! use roster_models::{Student, StudentFilter, StudentStatus};
//!
//! let student = Student::new("S001", "Alice", "CS", 100, 3.8, "a@x.com", "0244000001");
//! let filter = StudentFilter::new().programme("CS").status(StudentStatus::Active);
//! assert!(filter.matches(&student));
//! ```

pub mod reports;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use reports::{DashboardStats, GpaBand, GpaBandCount, GpaDistribution, ProgrammeSummary};
pub use students::{
    MAX_GPA, MIN_GPA, ParseStatusError, Student, StudentFilter, StudentStatus, VALID_LEVELS,
};
