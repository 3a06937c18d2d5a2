pub mod students;
pub mod transfer;

pub use self::students::model::Student;
pub use self::students::service::StudentService;
pub use self::transfer::service::CsvTransferService;
