use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::FileStorage;
use crate::application::services::ContentAnalyzer;
use crate::domain::entities::{FileRecord, NewFileRecord};
use crate::domain::repositories::{
    FileRecordRepository, file_record_repository::FileRecordRepositoryError,
};
use crate::domain::value_objects::{AnalysisResult, TagSet, guess_content_type};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded and analyzed successfully";

#[derive(Debug)]
pub enum UploadFileError {
    ValidationError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for UploadFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadFileError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadFileError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            UploadFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UploadFileError {}

impl From<FileRecordRepositoryError> for UploadFileError {
    fn from(error: FileRecordRepositoryError) -> Self {
        UploadFileError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadFileRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
    pub is_public: bool,
    /// Comma-separated, as typed by the user.
    pub tags: String,
}

#[derive(Debug, Clone)]
pub struct UploadFileResponse {
    pub file_id: Uuid,
    pub file_name: String,
    pub analysis: AnalysisResult,
    pub message: String,
}

/// Stores the bytes, analyzes them and persists the resulting record.
///
/// A storage failure aborts the upload before anything is recorded. An
/// analysis failure does not: the analyzer hands back a fallback record
/// and the upload carries on.
pub struct UploadFileUseCase {
    file_repository: Arc<dyn FileRecordRepository>,
    file_storage: Arc<dyn FileStorage>,
    content_analyzer: Arc<ContentAnalyzer>,
}

impl UploadFileUseCase {
    pub fn new(
        file_repository: Arc<dyn FileRecordRepository>,
        file_storage: Arc<dyn FileStorage>,
        content_analyzer: Arc<ContentAnalyzer>,
    ) -> Self {
        Self {
            file_repository,
            file_storage,
            content_analyzer,
        }
    }

    pub async fn execute(
        &self,
        request: UploadFileRequest,
    ) -> Result<UploadFileResponse, UploadFileError> {
        if request.file_name.trim().is_empty() {
            return Err(UploadFileError::ValidationError(
                "No file provided".to_string(),
            ));
        }

        let stored_file = self
            .file_storage
            .store_file(&request.file_data, &request.file_name)
            .await
            .map_err(|e| UploadFileError::StorageError(e.to_string()))?;

        tracing::info!(
            "Stored {} as {} ({} bytes)",
            request.file_name,
            stored_file.stored_name,
            stored_file.size
        );

        let content_type = guess_content_type(&request.file_name);
        let user_tags = TagSet::parse_comma_separated(&request.tags);

        let analysis = self
            .content_analyzer
            .analyze(&request.file_data, &content_type, &request.file_name)
            .await;

        let tags = user_tags.union(&analysis.suggested_tags());

        let record = FileRecord::create(NewFileRecord {
            original_filename: request.file_name.clone(),
            stored_name: stored_file.stored_name,
            storage_location: stored_file.location,
            size_bytes: stored_file.size as i64,
            content_type,
            analysis: analysis.clone(),
            tags,
            is_public: request.is_public,
            uploaded_by: None,
        });

        self.file_repository.insert(&record).await?;

        tracing::info!(
            "Recorded upload {} for {} with {} tags",
            record.id(),
            request.file_name,
            record.tags().len()
        );

        Ok(UploadFileResponse {
            file_id: record.id(),
            file_name: request.file_name,
            analysis,
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
        })
    }
}
