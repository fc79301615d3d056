use async_trait::async_trait;

use crate::domain::entities::StatusCheck;

#[derive(Debug)]
pub enum StatusCheckRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for StatusCheckRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCheckRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StatusCheckRepositoryError {}

#[async_trait]
pub trait StatusCheckRepository: Send + Sync {
    async fn insert(&self, status_check: &StatusCheck) -> Result<(), StatusCheckRepositoryError>;
    async fn list(&self, limit: i64) -> Result<Vec<StatusCheck>, StatusCheckRepositoryError>;
}
