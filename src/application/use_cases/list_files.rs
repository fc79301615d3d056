use std::sync::Arc;

use crate::domain::entities::FileRecord;
use crate::domain::repositories::{
    FileRecordRepository, file_record_repository::FileRecordRepositoryError,
};

pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug)]
pub enum ListFilesError {
    RepositoryError(String),
    ValidationError(String),
}

impl std::fmt::Display for ListFilesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFilesError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ListFilesError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ListFilesError {}

impl From<FileRecordRepositoryError> for ListFilesError {
    fn from(error: FileRecordRepositoryError) -> Self {
        ListFilesError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListFilesRequest {
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone)]
pub struct ListFilesResponse {
    pub files: Vec<FileRecord>,
}

pub struct ListFilesUseCase {
    file_repository: Arc<dyn FileRecordRepository>,
}

impl ListFilesUseCase {
    pub fn new(file_repository: Arc<dyn FileRecordRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(
        &self,
        request: ListFilesRequest,
    ) -> Result<ListFilesResponse, ListFilesError> {
        if request.skip < 0 {
            return Err(ListFilesError::ValidationError(
                "Skip cannot be negative".to_string(),
            ));
        }

        if request.limit <= 0 || request.limit > MAX_PAGE_SIZE {
            return Err(ListFilesError::ValidationError(format!(
                "Limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let files = self
            .file_repository
            .list(request.skip, request.limit)
            .await?;

        Ok(ListFilesResponse { files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryFileRecordRepository;

    fn use_case() -> ListFilesUseCase {
        ListFilesUseCase::new(Arc::new(InMemoryFileRecordRepository::new()))
    }

    #[tokio::test]
    async fn test_paging_bounds_are_validated() {
        let list = use_case();

        for (skip, limit) in [(-1, 50), (0, 0), (0, MAX_PAGE_SIZE + 1)] {
            let result = list.execute(ListFilesRequest { skip, limit }).await;
            assert!(matches!(result, Err(ListFilesError::ValidationError(_))));
        }

        let result = list
            .execute(ListFilesRequest {
                skip: 0,
                limit: MAX_PAGE_SIZE,
            })
            .await;
        assert!(result.unwrap().files.is_empty());
    }
}
