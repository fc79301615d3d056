use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{FileRecord, SearchCriteria};

#[derive(Debug)]
pub enum FileRecordRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for FileRecordRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileRecordRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            FileRecordRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FileRecordRepositoryError {}

/// Record attribute a rollup can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateField {
    ContentType,
    /// Each tag counts once for every record carrying it.
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    #[serde(rename = "_id")]
    pub value: String,
    pub count: i64,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: i64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Sorts rollup rows by count descending, ties by value ascending.
pub fn sort_value_counts(counts: &mut [ValueCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
}

#[async_trait]
pub trait FileRecordRepository: Send + Sync {
    async fn insert(&self, record: &FileRecord) -> Result<(), FileRecordRepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileRecordRepositoryError>;
    /// Records in upload order.
    async fn list(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError>;
    async fn search(
        &self,
        criteria: &SearchCriteria,
        limit: i64,
    ) -> Result<Vec<FileRecord>, FileRecordRepositoryError>;
    /// Rows sorted by count descending, then value ascending.
    async fn aggregate_counts_by(
        &self,
        field: AggregateField,
        limit: Option<i64>,
    ) -> Result<Vec<ValueCount>, FileRecordRepositoryError>;
    async fn count(&self) -> Result<i64, FileRecordRepositoryError>;
    /// Records whose analysis came from parsed model output.
    async fn count_ai_analyzed(&self) -> Result<i64, FileRecordRepositoryError>;
}
