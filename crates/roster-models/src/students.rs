//! Student domain models.
//!
//! This module contains the student record, its status enumeration and the
//! multi-field filter used by storage queries.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Levels a student can be enrolled at.
pub const VALID_LEVELS: [i32; 7] = [100, 200, 300, 400, 500, 600, 700];

pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

/// Enrolment status of a student.
///
/// Stored as free text (`"Active"` / `"Inactive"`) but only these two values
/// are ever produced or accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Status must be 'Active' or 'Inactive', found '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for StudentStatus {
    type Err = ParseStatusError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A student record.
///
/// `student_id` is the sole key and never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: String,
    pub full_name: String,
    pub programme: String,
    pub level: i32,
    pub gpa: f64,
    pub email: String,
    pub phone_number: String,
    pub date_added: NaiveDate,
    #[serde(default)]
    pub status: StudentStatus,
}

impl Student {
    /// Creates an active student added today.
    pub fn new(
        student_id: impl Into<String>,
        full_name: impl Into<String>,
        programme: impl Into<String>,
        level: i32,
        gpa: f64,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            full_name: full_name.into(),
            programme: programme.into(),
            level,
            gpa,
            email: email.into(),
            phone_number: phone_number.into(),
            date_added: Local::now().date_naive(),
            status: StudentStatus::Active,
        }
    }

    pub fn with_date_added(mut self, date_added: NaiveDate) -> Self {
        self.date_added = date_added;
        self
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }

    /// True when the id or full name contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased. Folding is Unicode-aware, so
    /// "émile" matches "Émile".
    pub fn matches_search(&self, needle: &str) -> bool {
        self.student_id.to_lowercase().contains(needle)
            || self.full_name.to_lowercase().contains(needle)
    }

    /// Strips surrounding whitespace from every text field.
    pub fn trimmed(mut self) -> Self {
        for field in [
            &mut self.student_id,
            &mut self.full_name,
            &mut self.programme,
            &mut self.email,
            &mut self.phone_number,
        ] {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }
}

/// Conjunctive filter over programme, level and status.
///
/// An omitted criterion matches everything. A blank programme counts as
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentFilter {
    pub programme: Option<String>,
    pub level: Option<i32>,
    pub status: Option<StudentStatus>,
}

impl StudentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn programme(mut self, programme: impl Into<String>) -> Self {
        self.programme = Some(programme.into());
        self
    }

    pub fn level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn status(mut self, status: StudentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// The programme criterion, ignoring blank values.
    pub fn programme_criterion(&self) -> Option<&str> {
        self.programme.as_deref().filter(|p| !p.is_empty())
    }

    pub fn matches(&self, student: &Student) -> bool {
        self.programme_criterion()
            .is_none_or(|programme| student.programme == programme)
            && self.level.is_none_or(|level| student.level == level)
            && self.status.is_none_or(|status| student.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student::new(
            "S001",
            "Alice Mensah",
            "Computer Science",
            100,
            3.8,
            "alice@test.com",
            "0244000001",
        )
    }

    #[test]
    fn test_new_student_defaults() {
        let student = sample();
        assert_eq!(student.status, StudentStatus::Active);
        assert_eq!(student.date_added, Local::now().date_naive());
        assert!(student.is_active());
    }

    #[test]
    fn test_status_round_trips_through_text() {
        assert_eq!("Active".parse(), Ok(StudentStatus::Active));
        assert_eq!("Inactive".parse(), Ok(StudentStatus::Inactive));
        assert_eq!(StudentStatus::Inactive.to_string(), "Inactive");
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        let err = "active".parse::<StudentStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("active".to_string()));
    }

    #[test]
    fn test_matches_search_folds_non_ascii_case() {
        let mut student = sample();
        student.full_name = "Émile Zola".to_string();
        assert!(student.matches_search("émile"));
        assert!(student.matches_search("s001"));
        assert!(!student.matches_search("%"));
    }

    #[test]
    fn test_trimmed_strips_text_fields() {
        let mut student = sample();
        student.student_id = " S001 ".to_string();
        student.full_name = "  Ama Owusu\t".to_string();
        student.email = " ama@test.com".to_string();

        let trimmed = student.trimmed();
        assert_eq!(trimmed.student_id, "S001");
        assert_eq!(trimmed.full_name, "Ama Owusu");
        assert_eq!(trimmed.email, "ama@test.com");
        assert_eq!(trimmed.programme, "Computer Science");
    }

    #[test]
    fn test_filter_empty_matches_everything() {
        assert!(StudentFilter::new().matches(&sample()));
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let student = sample();
        let filter = StudentFilter::new()
            .programme("Computer Science")
            .level(100)
            .status(StudentStatus::Active);
        assert!(filter.matches(&student));

        let wrong_level = StudentFilter::new().programme("Computer Science").level(200);
        assert!(!wrong_level.matches(&student));

        let inactive = StudentFilter::new().status(StudentStatus::Inactive);
        assert!(!inactive.matches(&student));
    }

    #[test]
    fn test_filter_blank_programme_is_ignored() {
        let filter = StudentFilter::new().programme("");
        assert_eq!(filter.programme_criterion(), None);
        assert!(filter.matches(&sample()));
    }

    #[test]
    fn test_student_serializes_status_as_text() {
        let json = serde_json::to_value(sample().with_status(StudentStatus::Inactive)).unwrap();
        assert_eq!(json["status"], "Inactive");
        assert_eq!(json["level"], 100);
    }
}
