pub mod get_analytics;
pub mod get_file;
pub mod list_files;
pub mod search_files;
pub mod status_checks;
pub mod upload_file;

pub use get_analytics::GetAnalyticsUseCase;
pub use get_file::GetFileUseCase;
pub use list_files::ListFilesUseCase;
pub use search_files::SearchFilesUseCase;
pub use status_checks::StatusCheckUseCase;
pub use upload_file::UploadFileUseCase;
