use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::value_objects::{AnalysisResult, TagSet};

/// Analysis keys whose text takes part in free-text search.
pub const SEARCHABLE_ANALYSIS_FIELDS: [&str; 4] =
    ["classification", "summary", "description", "key_topics"];

/// Separates fields inside the search document so a query cannot match
/// across a field boundary.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Everything needed to create a record except the generated identity.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub original_filename: String,
    pub stored_name: String,
    pub storage_location: String,
    pub size_bytes: i64,
    pub content_type: String,
    pub analysis: AnalysisResult,
    pub tags: TagSet,
    pub is_public: bool,
    pub uploaded_by: Option<String>,
}

/// Metadata and analysis for one uploaded file. Created once and never
/// mutated afterwards, so only getters are exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    id: Uuid,
    original_filename: String,
    stored_name: String,
    storage_location: String,
    size_bytes: i64,
    content_type: String,
    uploaded_at: DateTime<Utc>,
    analysis: AnalysisResult,
    tags: TagSet,
    is_public: bool,
    uploaded_by: Option<String>,
}

impl FileRecord {
    pub fn create(new_record: NewFileRecord) -> Self {
        Self::restore(Uuid::new_v4(), Utc::now(), new_record)
    }

    /// Rebuilds a record that was already persisted.
    pub fn restore(id: Uuid, uploaded_at: DateTime<Utc>, record: NewFileRecord) -> Self {
        Self {
            id,
            original_filename: record.original_filename,
            stored_name: record.stored_name,
            storage_location: record.storage_location,
            size_bytes: record.size_bytes,
            content_type: record.content_type,
            uploaded_at,
            analysis: record.analysis,
            tags: record.tags,
            is_public: record.is_public,
            uploaded_by: record.uploaded_by,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn storage_location(&self) -> &str {
        &self.storage_location
    }

    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn uploaded_at(&self) -> DateTime<Utc> {
        self.uploaded_at
    }

    pub fn analysis(&self) -> &AnalysisResult {
        &self.analysis
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn uploaded_by(&self) -> Option<&str> {
        self.uploaded_by.as_deref()
    }

    /// Lowercased text of every searchable field: the original filename,
    /// each tag, and the string (or string-array) values of
    /// [`SEARCHABLE_ANALYSIS_FIELDS`].
    pub fn search_document(&self) -> String {
        let mut parts: Vec<&str> = vec![self.original_filename.as_str()];
        parts.extend(self.tags.iter());

        for key in SEARCHABLE_ANALYSIS_FIELDS {
            match self.analysis.get(key) {
                Some(Value::String(text)) => parts.push(text),
                Some(Value::Array(items)) => parts.extend(items.iter().filter_map(Value::as_str)),
                _ => {}
            }
        }

        parts
            .iter()
            .map(|part| part.to_lowercase())
            .collect::<Vec<_>>()
            .join(&FIELD_SEPARATOR.to_string())
    }
}
