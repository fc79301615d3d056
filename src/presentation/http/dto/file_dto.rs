use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::application::use_cases::upload_file::UploadFileResponse;
use crate::domain::entities::FileRecord;

#[derive(Debug, Clone, Serialize)]
pub struct FileRecordDto {
    pub id: Uuid,
    pub original_filename: String,
    pub stored_filename: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub upload_timestamp: DateTime<Utc>,
    pub ai_analysis: Value,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub uploaded_by: Option<String>,
}

impl From<FileRecord> for FileRecordDto {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id(),
            original_filename: record.original_filename().to_string(),
            stored_filename: record.stored_name().to_string(),
            file_path: record.storage_location().to_string(),
            file_size: record.size_bytes(),
            file_type: record.content_type().to_string(),
            upload_timestamp: record.uploaded_at(),
            ai_analysis: record.analysis().clone().into(),
            tags: record.tags().to_vec(),
            is_public: record.is_public(),
            uploaded_by: record.uploaded_by().map(|s| s.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationDto {
    #[serde(default = "default_skip")]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_skip() -> i64 {
    0
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub success: bool,
    pub file_id: Uuid,
    pub filename: String,
    pub ai_analysis: Value,
    pub message: String,
}

impl From<UploadFileResponse> for UploadResponseDto {
    fn from(response: UploadFileResponse) -> Self {
        Self {
            success: true,
            file_id: response.file_id,
            filename: response.file_name,
            ai_analysis: response.analysis.into(),
            message: response.message,
        }
    }
}

/// Parses an HTML form boolean the way browsers and curl tend to send it.
pub fn parse_form_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_bool() {
        assert_eq!(parse_form_bool("TRUE"), Some(true));
        assert_eq!(parse_form_bool(" on "), Some(true));
        assert_eq!(parse_form_bool("0"), Some(false));
        assert_eq!(parse_form_bool("No"), Some(false));
        assert_eq!(parse_form_bool("maybe"), None);
        assert_eq!(parse_form_bool(""), None);
    }
}
