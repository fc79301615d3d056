use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::StatusCheck;
use crate::domain::repositories::StatusCheckRepository;
use crate::domain::repositories::status_check_repository::StatusCheckRepositoryError;
use crate::infrastructure::database::models::StatusCheckModel;
use crate::infrastructure::database::schema::status_checks;
use crate::infrastructure::database::{DatabaseError, DbPool, with_connection};

impl From<DatabaseError> for StatusCheckRepositoryError {
    fn from(error: DatabaseError) -> Self {
        StatusCheckRepositoryError::DatabaseError(error.to_string())
    }
}

pub struct PostgresStatusCheckRepository {
    pool: DbPool,
}

impl PostgresStatusCheckRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusCheckRepository for PostgresStatusCheckRepository {
    async fn insert(&self, status_check: &StatusCheck) -> Result<(), StatusCheckRepositoryError> {
        let model = StatusCheckModel::from(status_check);

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(status_checks::table)
                .values(&model)
                .execute(conn)
        })
        .await?;

        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<StatusCheck>, StatusCheckRepositoryError> {
        let models = with_connection(&self.pool, move |conn| {
            status_checks::table
                .select(StatusCheckModel::as_select())
                .order((status_checks::created_at.asc(), status_checks::id.asc()))
                .limit(limit)
                .load(conn)
        })
        .await?;

        Ok(models.into_iter().map(StatusCheck::from).collect())
    }
}
