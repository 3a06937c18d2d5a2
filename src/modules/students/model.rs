//! Student models.
//!
//! Re-exports the record and report types from `roster-models` and adds the
//! types only the service layer produces.

use roster_core::RosterError;
use serde::Serialize;

pub use roster_models::reports::*;
pub use roster_models::students::*;

/// A record that could not be committed during a batch add.
#[derive(Debug)]
pub struct CommitFailure {
    pub student_id: String,
    pub error: RosterError,
}

/// Result of adding a batch of already-validated records one by one.
#[derive(Debug, Default)]
pub struct CommitSummary {
    pub saved: usize,
    pub failures: Vec<CommitFailure>,
}

impl CommitSummary {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One `"<id>: <reason>"` line per failed record.
    pub fn failure_messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.student_id, f.error))
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct CommitSummaryView<'a> {
    saved: usize,
    failures: &'a [String],
}

impl Serialize for CommitSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let messages = self.failure_messages();
        CommitSummaryView {
            saved: self.saved,
            failures: &messages,
        }
        .serialize(serializer)
    }
}
