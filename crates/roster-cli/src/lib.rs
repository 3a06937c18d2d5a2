//! # Roster CLI
//!
//! Fake-data seeding used by the `roster` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use roster_cli::seeder::{SeedConfig, seed_students};
//!
//! let summary = seed_students(&state.students, SeedConfig::new(50)).await?;
//! ```

pub mod seeder;
