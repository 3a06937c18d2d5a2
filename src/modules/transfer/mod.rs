pub mod model;
pub mod service;

pub use self::model::{ImportDiagnostic, ImportOutcome, RowError};
pub use self::service::CsvTransferService;
