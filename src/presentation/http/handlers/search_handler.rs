use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::SearchFilesUseCase;
use crate::presentation::http::dto::{FileRecordDto, SearchRequestDto};
use crate::presentation::http::errors::ApiError;

pub struct SearchHandler {
    search_use_case: Arc<SearchFilesUseCase>,
}

impl SearchHandler {
    pub fn new(search_use_case: Arc<SearchFilesUseCase>) -> Self {
        Self { search_use_case }
    }

    pub async fn search_files(
        State(handler): State<Arc<SearchHandler>>,
        Json(search_request): Json<SearchRequestDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler.search_use_case.execute(search_request.into()).await?;
        let files: Vec<FileRecordDto> = response
            .files
            .into_iter()
            .map(FileRecordDto::from)
            .collect();

        Ok((StatusCode::OK, Json(files)))
    }
}
