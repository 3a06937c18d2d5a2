//! Storage port for student records.
//!
//! The service layer only talks to this trait, never to a concrete engine.
//! Implementations own all storage details; no engine types appear in
//! signatures.
//!
//! Cross-record rules (uniqueness on add, existence on update/delete) are
//! enforced by `StudentService`, not here.

use async_trait::async_trait;
use roster_core::Result;
use roster_models::{Student, StudentFilter};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// Fails with a storage error if the engine rejects the write.
    async fn save(&self, student: &Student) -> Result<()>;

    /// Replaces every mutable field of the record with the same id.
    async fn update(&self, student: &Student) -> Result<()>;

    /// Removes the record with `student_id`. A missing id is a no-op.
    async fn delete(&self, student_id: &str) -> Result<()>;

    async fn find_by_id(&self, student_id: &str) -> Result<Option<Student>>;

    /// All records, ordered by full name.
    async fn find_all(&self) -> Result<Vec<Student>>;

    /// Records whose id or full name contains `query`, ignoring case,
    /// ordered by full name.
    async fn search(&self, query: &str) -> Result<Vec<Student>>;

    /// Records matching every criterion set in `filter`, ordered by full name.
    async fn filter(&self, filter: &StudentFilter) -> Result<Vec<Student>>;

    /// Distinct programme names, sorted.
    async fn find_all_programmes(&self) -> Result<Vec<String>>;

    async fn exists_by_id(&self, student_id: &str) -> Result<bool>;
}
