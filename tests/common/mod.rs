use std::sync::Arc;

use chrono::NaiveDate;
use roster::modules::students::{
    InMemoryStudentRepository, SqliteStudentRepository, StudentRepository, StudentService,
};
use roster_config::DatabaseConfig;
use roster_db::{SqlitePool, init_db_pool};
use roster_models::Student;

/// A valid, active student with a fixed date added.
#[allow(dead_code)]
pub fn make_student(id: &str, name: &str, programme: &str, level: i32, gpa: f64) -> Student {
    Student::new(
        id,
        name,
        programme,
        level,
        gpa,
        format!("{}@test.com", name.to_lowercase().replace(' ', ".")),
        "0244000001",
    )
    .with_date_added(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap())
}

/// Alice 3.8, Bob 1.5, Carol 2.5, Dave 0.9, Eve 3.9, all active.
#[allow(dead_code)]
pub fn five_students() -> Vec<Student> {
    vec![
        make_student("S1001", "Alice Mensah", "Computer Science", 100, 3.8),
        make_student("S1002", "Bob Asante", "Mathematics", 200, 1.5),
        make_student("S1003", "Carol Boateng", "Computer Science", 300, 2.5),
        make_student("S1004", "Dave Owusu", "Mathematics", 100, 0.9),
        make_student("S1005", "Eve Darko", "Biology", 400, 3.9),
    ]
}

#[allow(dead_code)]
pub fn first_names(students: &[Student]) -> Vec<&str> {
    students
        .iter()
        .map(|s| s.full_name.split(' ').next().unwrap_or_default())
        .collect()
}

/// A fresh in-memory SQLite database with the schema in place.
#[allow(dead_code)]
pub async fn setup_test_db() -> SqlitePool {
    init_db_pool(&DatabaseConfig::in_memory())
        .await
        .expect("Failed to open in-memory database")
}

#[allow(dead_code)]
pub async fn sqlite_service() -> StudentService {
    let repo: Arc<dyn StudentRepository> =
        Arc::new(SqliteStudentRepository::new(setup_test_db().await));
    StudentService::new(repo)
}

#[allow(dead_code)]
pub fn memory_service() -> StudentService {
    StudentService::new(Arc::new(InMemoryStudentRepository::new()))
}

/// Adds every student through the service, failing the test on any error.
#[allow(dead_code)]
pub async fn seed(service: &StudentService, students: &[Student]) {
    for student in students {
        service
            .add_record(student)
            .await
            .expect("Failed to seed student");
    }
}
