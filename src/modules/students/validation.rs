//! Field rules for student records.
//!
//! Every rule appends zero or more messages to a caller-supplied
//! [`ValidationOutcome`] and never fails fast, so one pass reports every
//! problem with a record. Invalid input is returned as data, not as an error.
//!
//! The email and phone checks are shallow (substring and charset
//! checks), not full format grammars.

use roster_core::ValidationOutcome;
use roster_models::{MAX_GPA, MIN_GPA, Student, VALID_LEVELS};
use validator::ValidateLength;

/// Runs every field rule against `student`.
pub fn validate_student(student: &Student) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    validate_student_id(&student.student_id, &mut outcome);
    validate_full_name(&student.full_name, &mut outcome);
    validate_programme(&student.programme, &mut outcome);
    validate_level(student.level, &mut outcome);
    validate_gpa(student.gpa, &mut outcome);
    validate_email(&student.email, &mut outcome);
    validate_phone(&student.phone_number, &mut outcome);

    outcome
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_student_id(id: &str, outcome: &mut ValidationOutcome) {
    if is_blank(id) {
        outcome.add_error("Student ID is required.");
        return;
    }
    if !id.validate_length(Some(4), Some(20), None) {
        outcome.add_error("Student ID must be between 4 and 20 characters.");
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        outcome.add_error("Student ID must contain only letters and digits.");
    }
}

pub fn validate_full_name(name: &str, outcome: &mut ValidationOutcome) {
    if is_blank(name) {
        outcome.add_error("Full name is required.");
        return;
    }
    if !name.validate_length(Some(2), Some(60), None) {
        outcome.add_error("Full name must be between 2 and 60 characters.");
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        outcome.add_error("Full name must not contain digits.");
    }
}

pub fn validate_programme(programme: &str, outcome: &mut ValidationOutcome) {
    if is_blank(programme) {
        outcome.add_error("Programme is required.");
    }
}

pub fn validate_level(level: i32, outcome: &mut ValidationOutcome) {
    if !VALID_LEVELS.contains(&level) {
        outcome.add_error("Level must be one of: 100, 200, 300, 400, 500, 600, 700.");
    }
}

/// Both bounds are inclusive. NaN fails.
pub fn validate_gpa(gpa: f64, outcome: &mut ValidationOutcome) {
    if !(MIN_GPA..=MAX_GPA).contains(&gpa) {
        outcome.add_error("GPA must be between 0.0 and 4.0.");
    }
}

pub fn validate_email(email: &str, outcome: &mut ValidationOutcome) {
    if is_blank(email) {
        outcome.add_error("Email is required.");
        return;
    }
    if !email.contains('@') || !email.contains('.') {
        outcome.add_error("Email must contain '@' and '.'.");
    }
}

pub fn validate_phone(phone: &str, outcome: &mut ValidationOutcome) {
    if is_blank(phone) {
        outcome.add_error("Phone number is required.");
        return;
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        outcome.add_error("Phone number must contain digits only.");
    }
    if !phone.validate_length(Some(10), Some(15), None) {
        outcome.add_error("Phone number must be between 10 and 15 digits.");
    }
}
