use std::sync::Arc;

use crate::domain::repositories::{
    AggregateField, FileRecordRepository, ValueCount,
    file_record_repository::FileRecordRepositoryError,
};

pub const TOP_TAGS_LIMIT: i64 = 20;

#[derive(Debug)]
pub enum GetAnalyticsError {
    RepositoryError(String),
}

impl std::fmt::Display for GetAnalyticsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetAnalyticsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetAnalyticsError {}

impl From<FileRecordRepositoryError> for GetAnalyticsError {
    fn from(error: FileRecordRepositoryError) -> Self {
        GetAnalyticsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetAnalyticsResponse {
    pub total_files: i64,
    pub file_type_distribution: Vec<ValueCount>,
    pub top_tags: Vec<ValueCount>,
    /// Share of records analyzed by the model, e.g. `"75%"`.
    pub ai_analysis_rate: String,
}

pub struct GetAnalyticsUseCase {
    file_repository: Arc<dyn FileRecordRepository>,
}

impl GetAnalyticsUseCase {
    pub fn new(file_repository: Arc<dyn FileRecordRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(&self) -> Result<GetAnalyticsResponse, GetAnalyticsError> {
        let total_files = self.file_repository.count().await?;
        let file_type_distribution = self
            .file_repository
            .aggregate_counts_by(AggregateField::ContentType, None)
            .await?;
        let top_tags = self
            .file_repository
            .aggregate_counts_by(AggregateField::Tags, Some(TOP_TAGS_LIMIT))
            .await?;
        let analyzed = self.file_repository.count_ai_analyzed().await?;

        Ok(GetAnalyticsResponse {
            total_files,
            file_type_distribution,
            top_tags,
            ai_analysis_rate: format_rate(analyzed, total_files),
        })
    }
}

fn format_rate(part: i64, total: i64) -> String {
    if total <= 0 {
        return "0%".to_string();
    }
    format!("{:.0}%", part as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FileRecord, NewFileRecord};
    use crate::domain::value_objects::{AnalysisResult, Confidence, TagSet};
    use crate::infrastructure::memory::InMemoryFileRecordRepository;
    use chrono::Utc;

    fn record(content_type: &str, tags: &str, confidence: Confidence) -> FileRecord {
        let mut analysis = AnalysisResult::try_from(serde_json::json!({})).unwrap();
        analysis.stamp("m", confidence, Utc::now());
        FileRecord::create(NewFileRecord {
            original_filename: "f".to_string(),
            stored_name: uuid::Uuid::new_v4().to_string(),
            storage_location: "/uploads".to_string(),
            size_bytes: 0,
            content_type: content_type.to_string(),
            analysis,
            tags: TagSet::parse_comma_separated(tags),
            is_public: false,
            uploaded_by: None,
        })
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0, 0), "0%");
        assert_eq!(format_rate(3, 4), "75%");
        assert_eq!(format_rate(2, 3), "67%");
        assert_eq!(format_rate(5, 5), "100%");
    }

    #[tokio::test]
    async fn test_analytics_summary() {
        let repository = Arc::new(InMemoryFileRecordRepository::new());
        for r in [
            record("image/jpeg", "a,b", Confidence::High),
            record("image/jpeg", "a", Confidence::High),
            record("application/pdf", "c", Confidence::Low),
            record("image/png", "", Confidence::High),
        ] {
            repository.insert(&r).await.unwrap();
        }

        let analytics = GetAnalyticsUseCase::new(repository).execute().await.unwrap();

        assert_eq!(analytics.total_files, 4);
        assert_eq!(
            analytics.file_type_distribution,
            vec![
                ValueCount::new("image/jpeg", 2),
                ValueCount::new("application/pdf", 1),
                ValueCount::new("image/png", 1),
            ]
        );
        assert_eq!(
            analytics.top_tags,
            vec![
                ValueCount::new("a", 2),
                ValueCount::new("b", 1),
                ValueCount::new("c", 1),
            ]
        );
        assert_eq!(analytics.ai_analysis_rate, "75%");
    }
}
