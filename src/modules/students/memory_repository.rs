use async_trait::async_trait;
use roster_core::{Result, RosterError};
use roster_models::{Student, StudentFilter};
use tokio::sync::RwLock;

use super::repository::StudentRepository;

/// In-memory implementation of [`StudentRepository`] for tests and dry runs.
///
/// Mirrors the SQLite adapter's ordering and matching rules, including the
/// unique key on `student_id`: a second `save` of the same id is a storage
/// error, as a constraint violation is in SQLite.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    students: RwLock<Vec<Student>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `students`.
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students: RwLock::new(students),
        }
    }

    async fn sorted_matching(&self, predicate: impl Fn(&Student) -> bool) -> Vec<Student> {
        let mut matching: Vec<Student> = self
            .students
            .read()
            .await
            .iter()
            .filter(|s| predicate(s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        matching
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn save(&self, student: &Student) -> Result<()> {
        let mut students = self.students.write().await;
        if students.iter().any(|s| s.student_id == student.student_id) {
            return Err(RosterError::storage(anyhow::anyhow!(
                "UNIQUE constraint failed: students.student_id ({})",
                student.student_id
            )));
        }
        students.push(student.clone());
        Ok(())
    }

    async fn update(&self, student: &Student) -> Result<()> {
        let mut students = self.students.write().await;
        if let Some(existing) = students
            .iter_mut()
            .find(|s| s.student_id == student.student_id)
        {
            *existing = student.clone();
        }
        Ok(())
    }

    async fn delete(&self, student_id: &str) -> Result<()> {
        self.students
            .write()
            .await
            .retain(|s| s.student_id != student_id);
        Ok(())
    }

    async fn find_by_id(&self, student_id: &str) -> Result<Option<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|s| s.student_id == student_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>> {
        Ok(self.sorted_matching(|_| true).await)
    }

    async fn search(&self, query: &str) -> Result<Vec<Student>> {
        let needle = query.to_lowercase();
        Ok(self.sorted_matching(|s| s.matches_search(&needle)).await)
    }

    async fn filter(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        Ok(self.sorted_matching(|s| filter.matches(s)).await)
    }

    async fn find_all_programmes(&self) -> Result<Vec<String>> {
        let mut programmes: Vec<String> = self
            .students
            .read()
            .await
            .iter()
            .map(|s| s.programme.clone())
            .collect();
        programmes.sort();
        programmes.dedup();
        Ok(programmes)
    }

    async fn exists_by_id(&self, student_id: &str) -> Result<bool> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .any(|s| s.student_id == student_id))
    }
}
