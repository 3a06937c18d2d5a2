use std::fmt;

use roster_core::ValidationOutcome;
use roster_models::{ParseStatusError, Student};
use serde::Serialize;
use thiserror::Error;

/// Column order shared by export, import and the header row.
pub const CSV_HEADER: [&str; 9] = [
    "student_id",
    "full_name",
    "programme",
    "level",
    "gpa",
    "email",
    "phone_number",
    "date_added",
    "status",
];

pub const ERROR_REPORT_HEADER: &str = "error_description";

pub const ALL_STUDENTS_FILE: &str = "all_students.csv";
pub const TOP_PERFORMERS_FILE: &str = "top_performers.csv";
pub const AT_RISK_FILE: &str = "at_risk_students.csv";
pub const IMPORT_ERRORS_FILE: &str = "import_errors.csv";

/// Why a single import row was skipped.
///
/// Row errors never abort an import; each becomes one [`ImportDiagnostic`].
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Could not parse row - Expected 9 columns, found {found}")]
    ColumnCount { found: usize },

    #[error("Could not parse row - Level '{0}' is not a whole number")]
    InvalidLevel(String),

    #[error("Could not parse row - GPA '{0}' is not a number")]
    InvalidGpa(String),

    #[error("Could not parse row - Date '{0}' is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("Could not parse row - {0}")]
    InvalidStatus(#[from] ParseStatusError),

    #[error("Could not parse row - Line is not valid UTF-8")]
    InvalidEncoding,

    #[error("Could not parse row - {0}")]
    Malformed(String),

    #[error("Duplicate ID '{0}' - skipped.")]
    DuplicateId(String),

    #[error("{}", .0.joined("; "))]
    Invalid(ValidationOutcome),
}

/// A skipped row, tagged with its 1-based line number in the source file.
#[derive(Debug)]
pub struct ImportDiagnostic {
    pub line: usize,
    pub error: RowError,
}

impl fmt::Display for ImportDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.error)
    }
}

/// Accepted records and per-line diagnostics, both in input order.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub accepted: Vec<Student>,
    pub diagnostics: Vec<ImportDiagnostic>,
}

impl ImportOutcome {
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl Serialize for ImportOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ImportOutcome", 2)?;
        state.serialize_field("accepted", &self.accepted)?;
        state.serialize_field("diagnostics", &self.messages())?;
        state.end()
    }
}
