//! In-memory reductions over a full record set.
//!
//! The service loads every record from storage and hands the slice here;
//! nothing is cached between calls.

use std::collections::BTreeMap;

use roster_models::{DashboardStats, GpaDistribution, ProgrammeSummary, Student, StudentStatus};

pub fn count_with_status(students: &[Student], status: StudentStatus) -> usize {
    students.iter().filter(|s| s.status == status).count()
}

/// Arithmetic mean of every GPA, or exactly 0.0 for an empty set.
pub fn average_gpa(students: &[Student]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    students.iter().map(|s| s.gpa).sum::<f64>() / students.len() as f64
}

pub fn dashboard_stats(students: &[Student]) -> DashboardStats {
    DashboardStats {
        total: students.len(),
        active: count_with_status(students, StudentStatus::Active),
        inactive: count_with_status(students, StudentStatus::Inactive),
        average_gpa: average_gpa(students),
    }
}

/// Highest GPA first, truncated to `n`.
///
/// The sort is stable, so equal GPAs keep their incoming order.
pub fn top_by_gpa(mut students: Vec<Student>, n: usize) -> Vec<Student> {
    students.sort_by(|a, b| b.gpa.total_cmp(&a.gpa));
    students.truncate(n);
    students
}

/// Records with GPA strictly below `threshold`, lowest first.
pub fn below_threshold(students: Vec<Student>, threshold: f64) -> Vec<Student> {
    let mut at_risk: Vec<Student> = students
        .into_iter()
        .filter(|s| s.gpa < threshold)
        .collect();
    at_risk.sort_by(|a, b| a.gpa.total_cmp(&b.gpa));
    at_risk
}

pub fn gpa_distribution(students: &[Student]) -> GpaDistribution {
    GpaDistribution::from_gpas(students.iter().map(|s| s.gpa))
}

/// One row per programme, sorted by programme name.
pub fn programme_summary(students: &[Student]) -> Vec<ProgrammeSummary> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for student in students {
        let entry = groups.entry(student.programme.as_str()).or_default();
        entry.0 += 1;
        entry.1 += student.gpa;
    }

    groups
        .into_iter()
        .map(|(programme, (total, gpa_sum))| ProgrammeSummary {
            programme: programme.to_string(),
            total,
            average_gpa: gpa_sum / total as f64,
        })
        .collect()
}
