use std::sync::Arc;

use crate::domain::entities::StatusCheck;
use crate::domain::repositories::{
    StatusCheckRepository, status_check_repository::StatusCheckRepositoryError,
};

pub const STATUS_CHECK_LIST_LIMIT: i64 = 1000;

#[derive(Debug)]
pub enum StatusCheckError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for StatusCheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCheckError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StatusCheckError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for StatusCheckError {}

impl From<StatusCheckRepositoryError> for StatusCheckError {
    fn from(error: StatusCheckRepositoryError) -> Self {
        StatusCheckError::RepositoryError(error.to_string())
    }
}

pub struct StatusCheckUseCase {
    status_check_repository: Arc<dyn StatusCheckRepository>,
}

impl StatusCheckUseCase {
    pub fn new(status_check_repository: Arc<dyn StatusCheckRepository>) -> Self {
        Self {
            status_check_repository,
        }
    }

    pub async fn record(&self, client_name: String) -> Result<StatusCheck, StatusCheckError> {
        if client_name.trim().is_empty() {
            return Err(StatusCheckError::ValidationError(
                "client_name cannot be empty".to_string(),
            ));
        }

        let status_check = StatusCheck::new(client_name);
        self.status_check_repository.insert(&status_check).await?;
        Ok(status_check)
    }

    pub async fn list(&self) -> Result<Vec<StatusCheck>, StatusCheckError> {
        Ok(self
            .status_check_repository
            .list(STATUS_CHECK_LIST_LIMIT)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryStatusCheckRepository;

    #[tokio::test]
    async fn test_record_and_list() {
        let use_case = StatusCheckUseCase::new(Arc::new(InMemoryStatusCheckRepository::new()));

        let first = use_case.record("web".to_string()).await.unwrap();
        use_case.record("mobile".to_string()).await.unwrap();

        let checks = use_case.list().await.unwrap();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0], first);
        assert_eq!(checks[1].client_name(), "mobile");
    }

    #[tokio::test]
    async fn test_blank_client_name_is_rejected() {
        let use_case = StatusCheckUseCase::new(Arc::new(InMemoryStatusCheckRepository::new()));
        let result = use_case.record(" ".to_string()).await;
        assert!(matches!(result, Err(StatusCheckError::ValidationError(_))));
    }
}
