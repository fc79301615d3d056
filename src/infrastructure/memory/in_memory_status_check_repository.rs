use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::StatusCheck;
use crate::domain::repositories::StatusCheckRepository;
use crate::domain::repositories::status_check_repository::StatusCheckRepositoryError;

pub struct InMemoryStatusCheckRepository {
    checks: RwLock<Vec<StatusCheck>>,
}

impl InMemoryStatusCheckRepository {
    pub fn new() -> Self {
        Self {
            checks: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStatusCheckRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusCheckRepository for InMemoryStatusCheckRepository {
    async fn insert(&self, status_check: &StatusCheck) -> Result<(), StatusCheckRepositoryError> {
        self.checks.write().await.push(status_check.clone());
        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<StatusCheck>, StatusCheckRepositoryError> {
        Ok(self
            .checks
            .read()
            .await
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
