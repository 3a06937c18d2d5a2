//! # Roster
//!
//! Domain layer for managing a roster of student records: validated
//! create/update/delete, search and filtering, aggregate reports, and bulk
//! CSV import/export with per-row error recovery.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── modules/
//! │   ├── students/    # Validation, storage port and adapters, service, reports
//! │   └── transfer/    # CSV import/export
//! └── state.rs         # Explicit dependency graph for hosts
//! ```
//!
//! Shared pieces live in workspace crates:
//!
//! - `roster-core`: error taxonomy and the validation accumulator
//! - `roster-models`: the student record and report value types
//! - `roster-config`: environment-driven configuration
//! - `roster-db`: SQLite pool and schema
//! - `roster-observability`: logging and event counters
//!
//! ## Quick Start
//!
//! ```ignore
//! use roster::state::init_app_state;
//! use roster_config::AppConfig;
//!
//! let state = init_app_state(AppConfig::from_env()).await?;
//! let top = state.students.top_performers(5, None, None).await?;
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! DATABASE_URL=sqlite://data/students.db
//! DATA_DIR=data
//! AT_RISK_THRESHOLD=2.0
//! LOG_LEVEL=info
//! ```

pub mod modules;
pub mod state;

// Re-export workspace crates for convenience
pub use roster_config;
pub use roster_core;
pub use roster_db;
pub use roster_models;
