pub mod file_record_repository;
pub mod status_check_repository;

pub use file_record_repository::{AggregateField, FileRecordRepository, ValueCount};
pub use status_check_repository::StatusCheckRepository;
