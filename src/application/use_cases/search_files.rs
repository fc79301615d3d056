use std::sync::Arc;

use crate::domain::entities::{FileRecord, SearchCriteria};
use crate::domain::repositories::{
    FileRecordRepository, file_record_repository::FileRecordRepositoryError,
};

pub const SEARCH_RESULT_CAP: i64 = 100;

#[derive(Debug)]
pub enum SearchFilesError {
    RepositoryError(String),
}

impl std::fmt::Display for SearchFilesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchFilesError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SearchFilesError {}

impl From<FileRecordRepositoryError> for SearchFilesError {
    fn from(error: FileRecordRepositoryError) -> Self {
        SearchFilesError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SearchFilesRequest {
    pub query: Option<String>,
    pub tags: Option<Vec<String>>,
    pub file_types: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct SearchFilesResponse {
    pub files: Vec<FileRecord>,
}

pub struct SearchFilesUseCase {
    file_repository: Arc<dyn FileRecordRepository>,
}

impl SearchFilesUseCase {
    pub fn new(file_repository: Arc<dyn FileRecordRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(
        &self,
        request: SearchFilesRequest,
    ) -> Result<SearchFilesResponse, SearchFilesError> {
        let criteria = SearchCriteria::new(request.query, request.tags, request.file_types);

        let files = self
            .file_repository
            .search(&criteria, SEARCH_RESULT_CAP)
            .await?;

        tracing::debug!("Search {:?} matched {} files", criteria, files.len());

        Ok(SearchFilesResponse { files })
    }
}
