pub mod postgres_file_record_repository;
pub mod postgres_status_check_repository;

pub use postgres_file_record_repository::PostgresFileRecordRepository;
pub use postgres_status_check_repository::PostgresStatusCheckRepository;
