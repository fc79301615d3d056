pub mod in_memory_file_record_repository;
pub mod in_memory_status_check_repository;

pub use in_memory_file_record_repository::InMemoryFileRecordRepository;
pub use in_memory_status_check_repository::InMemoryStatusCheckRepository;
