use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::FileRecord;
use crate::domain::repositories::{
    FileRecordRepository, file_record_repository::FileRecordRepositoryError,
};

#[derive(Debug)]
pub enum GetFileError {
    FileNotFound(String),
    RepositoryError(String),
}

impl std::fmt::Display for GetFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetFileError::FileNotFound(id) => write!(f, "File not found: {}", id),
            GetFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetFileError {}

impl From<FileRecordRepositoryError> for GetFileError {
    fn from(error: FileRecordRepositoryError) -> Self {
        GetFileError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetFileRequest {
    /// Opaque id as received from the client.
    pub file_id: String,
}

#[derive(Debug, Clone)]
pub struct GetFileResponse {
    pub file: FileRecord,
}

pub struct GetFileUseCase {
    file_repository: Arc<dyn FileRecordRepository>,
}

impl GetFileUseCase {
    pub fn new(file_repository: Arc<dyn FileRecordRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(&self, request: GetFileRequest) -> Result<GetFileResponse, GetFileError> {
        // Ids are always UUIDs, so anything else cannot name a record.
        let file_id = Uuid::parse_str(&request.file_id)
            .map_err(|_| GetFileError::FileNotFound(request.file_id.clone()))?;

        let file = self
            .file_repository
            .find_by_id(file_id)
            .await?
            .ok_or(GetFileError::FileNotFound(request.file_id))?;

        Ok(GetFileResponse { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewFileRecord;
    use crate::domain::value_objects::{AnalysisResult, TagSet};
    use crate::infrastructure::memory::InMemoryFileRecordRepository;

    #[tokio::test]
    async fn test_get_is_free_of_side_effects() {
        let repository = Arc::new(InMemoryFileRecordRepository::new());
        let record = FileRecord::create(NewFileRecord {
            original_filename: "a.txt".to_string(),
            stored_name: "s.txt".to_string(),
            storage_location: "/uploads/s.txt".to_string(),
            size_bytes: 1,
            content_type: "text/plain".to_string(),
            analysis: AnalysisResult::unavailable("a.txt", "offline"),
            tags: TagSet::new(),
            is_public: true,
            uploaded_by: None,
        });
        repository.insert(&record).await.unwrap();

        let use_case = GetFileUseCase::new(repository);
        let request = GetFileRequest {
            file_id: record.id().to_string(),
        };
        let first = use_case.execute(request.clone()).await.unwrap();
        let second = use_case.execute(request).await.unwrap();

        assert_eq!(first.file, record);
        assert_eq!(first.file, second.file);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let use_case = GetFileUseCase::new(Arc::new(InMemoryFileRecordRepository::new()));

        for file_id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
            let result = use_case.execute(GetFileRequest { file_id }).await;
            assert!(matches!(result, Err(GetFileError::FileNotFound(_))));
        }
    }
}
