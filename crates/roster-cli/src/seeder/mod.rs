//! Fake student generation.
//!
//! Records are generated in parallel, then added one by one through the
//! record service so every seeded row passes the same rules as manual input.

mod models;

pub use models::{PROGRAMMES, SeedConfig};

use std::collections::HashSet;
use std::time::Instant;

use chrono::{Duration, Local};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::number::en::NumberWithFormat;
use rayon::prelude::*;
use roster::modules::students::StudentService;
use roster::modules::students::model::CommitSummary;
use roster_core::Result;
use roster_models::{Student, StudentStatus, VALID_LEVELS};

/// Picks `count` ids not already in `taken`, in increasing index order.
pub fn free_ids(config: &SeedConfig, taken: &HashSet<String>) -> Vec<String> {
    (1..)
        .map(|index| config.student_id(index))
        .filter(|id| !taken.contains(id))
        .take(config.count)
        .collect()
}

pub fn generate_students(config: &SeedConfig, ids: Vec<String>) -> Vec<Student> {
    ids.into_par_iter()
        .map(|id| generate_student(config, id))
        .collect()
}

fn generate_student(config: &SeedConfig, student_id: String) -> Student {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let programme = PROGRAMMES[(0..PROGRAMMES.len()).fake::<usize>()];
    let level = VALID_LEVELS[(0..VALID_LEVELS.len()).fake::<usize>()];
    let gpa = (0..=400).fake::<i32>() as f64 / 100.0;
    let email: String = SafeEmail().fake();
    let phone: String = NumberWithFormat("0#########").fake();
    let days_ago = (0..365).fake::<i64>();

    let status = if config.inactive_every > 0 && (0..config.inactive_every).fake::<u32>() == 0 {
        StudentStatus::Inactive
    } else {
        StudentStatus::Active
    };

    Student::new(
        student_id,
        format!("{first_name} {last_name}"),
        programme,
        level,
        gpa,
        email,
        phone,
    )
    .with_date_added(Local::now().date_naive() - Duration::days(days_ago))
    .with_status(status)
}

/// Generates `config.count` students with fresh ids and adds them.
pub async fn seed_students(service: &StudentService, config: SeedConfig) -> Result<CommitSummary> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", config.count);

    let taken = service.existing_ids().await?;
    let ids = free_ids(&config, &taken);
    let students = generate_students(&config, ids);
    let summary = service.add_records(&students).await;

    println!(
        "   ✓ Inserted {} students in {:?}",
        summary.saved,
        start_time.elapsed()
    );
    Ok(summary)
}
