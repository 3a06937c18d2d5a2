use std::collections::HashSet;
use std::sync::Arc;

use roster_core::{Result, RosterError};
use roster_observability::{track_record_added, track_record_deleted, track_record_updated};
use tracing::{info, instrument, warn};

use super::model::{
    CommitFailure, CommitSummary, DashboardStats, GpaDistribution, ProgrammeSummary, Student,
    StudentFilter, StudentStatus,
};
use super::reports;
use super::repository::StudentRepository;
use super::validation::validate_student;

/// Business rules for student records on top of a [`StudentRepository`].
///
/// Every write is validated in full before storage is touched. Text fields
/// are trimmed first, so a stored record matches what an export/import
/// round trip gives back. Uniqueness on add and existence on update/delete
/// are checked here.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, student), fields(student.id = %student.student_id))]
    pub async fn add_record(&self, student: &Student) -> Result<()> {
        let student = &student.clone().trimmed();
        let outcome = validate_student(student);
        if !outcome.is_valid() {
            return Err(RosterError::validation(outcome));
        }
        if self.repo.exists_by_id(&student.student_id).await? {
            return Err(RosterError::duplicate_id(&student.student_id));
        }

        self.repo.save(student).await?;
        track_record_added();
        info!(student.id = %student.student_id, "Student record added");
        Ok(())
    }

    /// Replaces the stored record that has `student.student_id`.
    ///
    /// The id itself is never changed by an update.
    #[instrument(skip(self, student), fields(student.id = %student.student_id))]
    pub async fn update_record(&self, student: &Student) -> Result<()> {
        let student = &student.clone().trimmed();
        let outcome = validate_student(student);
        if !outcome.is_valid() {
            return Err(RosterError::validation(outcome));
        }
        if !self.repo.exists_by_id(&student.student_id).await? {
            return Err(RosterError::not_found(&student.student_id));
        }

        self.repo.update(student).await?;
        track_record_updated();
        info!(student.id = %student.student_id, "Student record updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_record(&self, student_id: &str) -> Result<()> {
        if !self.repo.exists_by_id(student_id).await? {
            return Err(RosterError::not_found(student_id));
        }

        self.repo.delete(student_id).await?;
        track_record_deleted();
        info!(student.id = %student_id, "Student record deleted");
        Ok(())
    }

    /// Adds each record through [`Self::add_record`].
    ///
    /// A failed record is collected into the summary and the rest still go
    /// through. Storage faults are collected the same way.
    #[instrument(skip(self, students), fields(batch.size = students.len()))]
    pub async fn add_records(&self, students: &[Student]) -> CommitSummary {
        let mut summary = CommitSummary::default();
        for student in students {
            match self.add_record(student).await {
                Ok(()) => summary.saved += 1,
                Err(error) => {
                    warn!(student.id = %student.student_id, error = %error, "Record not committed");
                    summary.failures.push(CommitFailure {
                        student_id: student.student_id.clone(),
                        error,
                    });
                }
            }
        }
        info!(saved = summary.saved, failed = summary.failures.len(), "Batch add finished");
        summary
    }

    pub async fn get_all(&self) -> Result<Vec<Student>> {
        self.repo.find_all().await
    }

    pub async fn get_by_id(&self, student_id: &str) -> Result<Option<Student>> {
        self.repo.find_by_id(student_id).await
    }

    /// Case-insensitive substring match on id or full name. A blank query
    /// returns every record.
    #[instrument(skip(self, query), fields(query.len = query.len()))]
    pub async fn search(&self, query: &str) -> Result<Vec<Student>> {
        let query = query.trim();
        if query.is_empty() {
            return self.repo.find_all().await;
        }
        self.repo.search(query).await
    }

    pub async fn filter(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        self.repo.filter(filter).await
    }

    pub async fn list_programmes(&self) -> Result<Vec<String>> {
        self.repo.find_all_programmes().await
    }

    /// Ids of every stored record, for pre-seeding an import.
    pub async fn existing_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .repo
            .find_all()
            .await?
            .into_iter()
            .map(|s| s.student_id)
            .collect())
    }

    pub async fn total_count(&self) -> Result<usize> {
        Ok(self.repo.find_all().await?.len())
    }

    pub async fn active_count(&self) -> Result<usize> {
        let students = self.repo.find_all().await?;
        Ok(reports::count_with_status(&students, StudentStatus::Active))
    }

    pub async fn inactive_count(&self) -> Result<usize> {
        let students = self.repo.find_all().await?;
        Ok(reports::count_with_status(&students, StudentStatus::Inactive))
    }

    pub async fn average_gpa(&self) -> Result<f64> {
        Ok(reports::average_gpa(&self.repo.find_all().await?))
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Ok(reports::dashboard_stats(&self.repo.find_all().await?))
    }

    /// Active records, optionally narrowed by programme and level, highest
    /// GPA first. Ties keep full-name order.
    #[instrument(skip(self))]
    pub async fn top_performers(
        &self,
        n: usize,
        programme: Option<&str>,
        level: Option<i32>,
    ) -> Result<Vec<Student>> {
        let mut filter = StudentFilter::new().status(StudentStatus::Active);
        if let Some(programme) = programme {
            filter = filter.programme(programme);
        }
        if let Some(level) = level {
            filter = filter.level(level);
        }

        let candidates = self.repo.filter(&filter).await?;
        Ok(reports::top_by_gpa(candidates, n))
    }

    /// Records with GPA strictly below `threshold`, lowest GPA first.
    #[instrument(skip(self))]
    pub async fn at_risk(&self, threshold: f64) -> Result<Vec<Student>> {
        let students = self.repo.find_all().await?;
        Ok(reports::below_threshold(students, threshold))
    }

    pub async fn gpa_distribution(&self) -> Result<GpaDistribution> {
        Ok(reports::gpa_distribution(&self.repo.find_all().await?))
    }

    pub async fn programme_summary(&self) -> Result<Vec<ProgrammeSummary>> {
        Ok(reports::programme_summary(&self.repo.find_all().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::students::memory_repository::InMemoryStudentRepository;

    fn service_with(students: Vec<Student>) -> StudentService {
        StudentService::new(Arc::new(InMemoryStudentRepository::with_students(students)))
    }

    fn student(id: &str, name: &str) -> Student {
        Student::new(id, name, "CS", 100, 3.0, "x@test.com", "0244000001")
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_before_duplicate_check() {
        let service = service_with(vec![student("S001", "Alice")]);
        let mut bad = student("S001", "Alice");
        bad.gpa = 9.0;

        let err = service.add_record(&bad).await.unwrap_err();
        assert_eq!(
            err.violations().map(|v| v.errors().to_vec()),
            Some(vec!["GPA must be between 0.0 and 4.0.".to_string()])
        );
    }

    #[tokio::test]
    async fn test_blank_search_returns_everything() {
        let service = service_with(vec![student("S001", "Alice"), student("S002", "Bob")]);
        assert_eq!(service.search("   ").await.unwrap().len(), 2);
        assert_eq!(service.search(" bo ").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_records_collects_failures() {
        let service = service_with(vec![student("S001", "Alice")]);
        let summary = service
            .add_records(&[student("S001", "Alice"), student("S002", "Bob")])
            .await;

        assert_eq!(summary.saved, 1);
        assert_eq!(summary.failure_messages(), ["S001: Student ID 'S001' already exists."]);
        assert!(!summary.is_complete());
    }

    #[tokio::test]
    async fn test_add_and_update_store_trimmed_text() {
        let service = service_with(vec![]);
        let mut padded = student(" S001 ", " Ama Owusu ");
        padded.email = " ama@test.com ".to_string();
        service.add_record(&padded).await.unwrap();

        let stored = service.get_by_id("S001").await.unwrap().unwrap();
        assert_eq!(stored.full_name, "Ama Owusu");
        assert_eq!(stored.email, "ama@test.com");

        let mut renamed = stored.clone();
        renamed.student_id = "S001 ".to_string();
        renamed.programme = "  Biology".to_string();
        service.update_record(&renamed).await.unwrap();
        assert_eq!(
            service.get_by_id("S001").await.unwrap().unwrap().programme,
            "Biology"
        );
    }

    #[tokio::test]
    async fn test_existing_ids() {
        let service = service_with(vec![student("S001", "Alice"), student("S002", "Bob")]);
        let ids = service.existing_ids().await.unwrap();
        assert!(ids.contains("S001") && ids.contains("S002"));
        assert_eq!(ids.len(), 2);
    }
}
