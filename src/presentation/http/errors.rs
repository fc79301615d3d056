use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::use_cases::{
    get_analytics::GetAnalyticsError, get_file::GetFileError, list_files::ListFilesError,
    search_files::SearchFilesError, status_checks::StatusCheckError,
    upload_file::UploadFileError,
};
use crate::presentation::http::dto::ErrorResponseDto;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Carries a client-safe message; the cause is logged where it is built.
    Internal(String),
}

impl ApiError {
    fn internal(public_message: &str, cause: &dyn std::fmt::Display) -> Self {
        tracing::error!("{}: {}", public_message, cause);
        ApiError::Internal(public_message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponseDto { detail })).into_response()
    }
}

impl From<UploadFileError> for ApiError {
    fn from(error: UploadFileError) -> Self {
        match error {
            UploadFileError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal("Upload failed", &other),
        }
    }
}

impl From<ListFilesError> for ApiError {
    fn from(error: ListFilesError) -> Self {
        match error {
            ListFilesError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal("Failed to fetch files", &other),
        }
    }
}

impl From<GetFileError> for ApiError {
    fn from(error: GetFileError) -> Self {
        match error {
            GetFileError::FileNotFound(_) => ApiError::NotFound("File not found".to_string()),
            other => ApiError::internal("Failed to fetch file", &other),
        }
    }
}

impl From<SearchFilesError> for ApiError {
    fn from(error: SearchFilesError) -> Self {
        ApiError::internal("Search failed", &error)
    }
}

impl From<GetAnalyticsError> for ApiError {
    fn from(error: GetAnalyticsError) -> Self {
        ApiError::internal("Failed to get analytics", &error)
    }
}

impl From<StatusCheckError> for ApiError {
    fn from(error: StatusCheckError) -> Self {
        match error {
            StatusCheckError::ValidationError(msg) => ApiError::BadRequest(msg),
            other => ApiError::internal("Status check failed", &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn detail(error: ApiError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body["detail"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_analytics_failure_hides_cause() {
        let error = ApiError::from(GetAnalyticsError::RepositoryError(
            "connection reset".to_string(),
        ));

        let (status, message) = detail(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Failed to get analytics");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let error = ApiError::from(UploadFileError::ValidationError(
            "No file provided".to_string(),
        ));

        assert_eq!(
            detail(error).await,
            (StatusCode::BAD_REQUEST, "No file provided".to_string())
        );
    }
}
