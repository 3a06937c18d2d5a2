pub mod memory_repository;
pub mod model;
pub mod reports;
pub mod repository;
pub mod service;
pub mod sqlite_repository;
pub mod validation;

pub use self::memory_repository::InMemoryStudentRepository;
pub use self::repository::StudentRepository;
pub use self::service::StudentService;
pub use self::sqlite_repository::SqliteStudentRepository;
