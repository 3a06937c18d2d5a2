//! SQLite implementation of [`StudentRepository`].
//!
//! Every query binds its parameters; no user input is ever spliced into SQL.

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::{Result, RosterError};
use roster_models::{Student, StudentFilter, StudentStatus};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{error, info, instrument, warn};

use super::repository::StudentRepository;

const SELECT_COLUMNS: &str = "SELECT student_id, full_name, programme, level, gpa, email, \
     phone_number, date_added, status FROM students";

/// Raw row shape; `status` is checked on the way out.
#[derive(FromRow)]
struct StudentRow {
    student_id: String,
    full_name: String,
    programme: String,
    level: i32,
    gpa: f64,
    email: String,
    phone_number: String,
    date_added: NaiveDate,
    status: String,
}

impl TryFrom<StudentRow> for Student {
    type Error = RosterError;

    fn try_from(row: StudentRow) -> Result<Self> {
        let status = row
            .status
            .parse::<StudentStatus>()
            .with_context(|| format!("Invalid status stored for student {}", row.student_id))
            .map_err(RosterError::storage)?;

        Ok(Student {
            student_id: row.student_id,
            full_name: row.full_name,
            programme: row.programme,
            level: row.level,
            gpa: row.gpa,
            email: row.email,
            phone_number: row.phone_number,
            date_added: row.date_added,
            status,
        })
    }
}

fn into_students(rows: Vec<StudentRow>) -> Result<Vec<Student>> {
    rows.into_iter().map(Student::try_from).collect()
}

#[derive(Clone, Debug)]
pub struct SqliteStudentRepository {
    db: SqlitePool,
}

impl SqliteStudentRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepository {
    #[instrument(skip(self, student), fields(student.id = %student.student_id, db.operation = "INSERT"))]
    async fn save(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO students
                   (student_id, full_name, programme, level, gpa, email, phone_number, date_added, status)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&student.student_id)
        .bind(&student.full_name)
        .bind(&student.programme)
        .bind(student.level)
        .bind(student.gpa)
        .bind(&student.email)
        .bind(&student.phone_number)
        .bind(student.date_added)
        .bind(student.status.as_str())
        .execute(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(student.id = %student.student_id, "Insert hit an existing student ID");
            }
            error!(error = %e, student.id = %student.student_id, "Database error saving student");
            RosterError::storage(anyhow::Error::from(e).context("Failed to save student"))
        })?;

        info!(student.id = %student.student_id, "Student saved");
        Ok(())
    }

    #[instrument(skip(self, student), fields(student.id = %student.student_id, db.operation = "UPDATE"))]
    async fn update(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"UPDATE students
               SET full_name = ?, programme = ?, level = ?, gpa = ?, email = ?,
                   phone_number = ?, date_added = ?, status = ?
               WHERE student_id = ?"#,
        )
        .bind(&student.full_name)
        .bind(&student.programme)
        .bind(student.level)
        .bind(student.gpa)
        .bind(&student.email)
        .bind(&student.phone_number)
        .bind(student.date_added)
        .bind(student.status.as_str())
        .bind(&student.student_id)
        .execute(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, student.id = %student.student_id, "Database error updating student");
            RosterError::storage(anyhow::Error::from(e).context("Failed to update student"))
        })?;

        info!(student.id = %student.student_id, "Student updated");
        Ok(())
    }

    #[instrument(skip(self), fields(db.operation = "DELETE"))]
    async fn delete(&self, student_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM students WHERE student_id = ?")
            .bind(student_id)
            .execute(&self.db)
            .await
            .context("Failed to delete student")
            .map_err(RosterError::storage)?;

        info!(student.id = %student_id, "Student deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(db.operation = "SELECT"))]
    async fn find_by_id(&self, student_id: &str) -> Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!("{SELECT_COLUMNS} WHERE student_id = ?"))
            .bind(student_id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(RosterError::storage)?;

        row.map(Student::try_from).transpose()
    }

    #[instrument(skip(self), fields(db.operation = "SELECT"))]
    async fn find_all(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!("{SELECT_COLUMNS} ORDER BY full_name"))
            .fetch_all(&self.db)
            .await
            .context("Failed to fetch students")
            .map_err(RosterError::storage)?;

        into_students(rows)
    }

    #[instrument(skip(self, query), fields(db.operation = "SELECT", query.len = query.len()))]
    async fn search(&self, query: &str) -> Result<Vec<Student>> {
        // SQLite's lower() folds ASCII only, so matching happens here
        let needle = query.to_lowercase();
        let mut students = self.find_all().await?;
        students.retain(|s| s.matches_search(&needle));
        Ok(students)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT"))]
    async fn filter(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        builder.push(" WHERE 1 = 1");

        if let Some(programme) = filter.programme_criterion() {
            builder.push(" AND programme = ").push_bind(programme);
        }
        if let Some(level) = filter.level {
            builder.push(" AND level = ").push_bind(level);
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        builder.push(" ORDER BY full_name");

        let rows = builder
            .build_query_as::<StudentRow>()
            .fetch_all(&self.db)
            .await
            .context("Failed to filter students")
            .map_err(RosterError::storage)?;

        into_students(rows)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT"))]
    async fn find_all_programmes(&self) -> Result<Vec<String>> {
        let programmes =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT programme FROM students ORDER BY programme")
                .fetch_all(&self.db)
                .await
                .context("Failed to fetch programmes")
                .map_err(RosterError::storage)?;

        Ok(programmes)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT"))]
    async fn exists_by_id(&self, student_id: &str) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM students WHERE student_id = ?")
            .bind(student_id)
            .fetch_optional(&self.db)
            .await
            .context("Failed to check student ID")
            .map_err(RosterError::storage)?;

        Ok(found.is_some())
    }
}
