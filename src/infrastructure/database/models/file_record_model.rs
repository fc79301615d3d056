use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{FileRecord, NewFileRecord};
use crate::domain::value_objects::{AnalysisResult, TagSet};
use crate::infrastructure::database::schema::file_records;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = file_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileRecordModel {
    pub id: Uuid,
    pub original_filename: String,
    pub stored_name: String,
    pub storage_location: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub analysis: serde_json::Value,
    pub tags: Vec<String>,
    pub search_text: String,
    pub is_public: bool,
    pub uploaded_by: Option<String>,
}

impl From<&FileRecord> for FileRecordModel {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id(),
            original_filename: record.original_filename().to_string(),
            stored_name: record.stored_name().to_string(),
            storage_location: record.storage_location().to_string(),
            size_bytes: record.size_bytes(),
            content_type: record.content_type().to_string(),
            uploaded_at: record.uploaded_at(),
            analysis: record.analysis().clone().into(),
            tags: record.tags().to_vec(),
            search_text: record.search_document(),
            is_public: record.is_public(),
            uploaded_by: record.uploaded_by().map(|s| s.to_string()),
        }
    }
}

impl TryFrom<FileRecordModel> for FileRecord {
    type Error = String;

    fn try_from(model: FileRecordModel) -> Result<Self, Self::Error> {
        let analysis = AnalysisResult::try_from(model.analysis)
            .map_err(|e| format!("Invalid analysis for {}: {}", model.id, e))?;

        Ok(FileRecord::restore(
            model.id,
            model.uploaded_at,
            NewFileRecord {
                original_filename: model.original_filename,
                stored_name: model.stored_name,
                storage_location: model.storage_location,
                size_bytes: model.size_bytes,
                content_type: model.content_type,
                analysis,
                tags: model.tags.into_iter().collect::<TagSet>(),
                is_public: model.is_public,
                uploaded_by: model.uploaded_by,
            },
        ))
    }
}
