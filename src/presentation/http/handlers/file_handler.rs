use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    GetFileUseCase, ListFilesUseCase, UploadFileUseCase, get_file::GetFileRequest,
    list_files::ListFilesRequest, upload_file::UploadFileRequest,
};
use crate::presentation::http::dto::{
    FileRecordDto, PaginationDto, UploadResponseDto, parse_form_bool,
};
use crate::presentation::http::errors::ApiError;

const NO_FILE_PROVIDED: &str = "No file provided";

pub struct FileHandler {
    upload_use_case: Arc<UploadFileUseCase>,
    list_files_use_case: Arc<ListFilesUseCase>,
    get_file_use_case: Arc<GetFileUseCase>,
}

impl FileHandler {
    pub fn new(
        upload_use_case: Arc<UploadFileUseCase>,
        list_files_use_case: Arc<ListFilesUseCase>,
        get_file_use_case: Arc<GetFileUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            list_files_use_case,
            get_file_use_case,
        }
    }

    /// Multipart form with a `file` part plus optional `is_public` and
    /// `tags` text parts. Unknown parts are ignored.
    pub async fn upload_file(
        State(handler): State<Arc<FileHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, ApiError> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut is_public = false;
        let mut tags = String::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
        {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec();
                    file = Some((file_name, data));
                }
                "is_public" => {
                    let raw = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                    is_public = parse_form_bool(&raw).ok_or_else(|| {
                        ApiError::BadRequest(format!("Invalid is_public value: {}", raw))
                    })?;
                }
                "tags" => {
                    tags = field
                        .text()
                        .await
                        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                }
                _ => {}
            }
        }

        let (file_name, file_data) = file
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest(NO_FILE_PROVIDED.to_string()))?;

        let request = UploadFileRequest {
            file_name,
            file_data,
            is_public,
            tags,
        };

        let response = handler.upload_use_case.execute(request).await?;
        Ok((StatusCode::OK, Json(UploadResponseDto::from(response))))
    }

    pub async fn list_files(
        State(handler): State<Arc<FileHandler>>,
        Query(pagination): Query<PaginationDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let request = ListFilesRequest {
            skip: pagination.skip,
            limit: pagination.limit,
        };

        let response = handler.list_files_use_case.execute(request).await?;
        let files: Vec<FileRecordDto> = response
            .files
            .into_iter()
            .map(FileRecordDto::from)
            .collect();

        Ok((StatusCode::OK, Json(files)))
    }

    pub async fn get_file(
        State(handler): State<Arc<FileHandler>>,
        Path(file_id): Path<String>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler
            .get_file_use_case
            .execute(GetFileRequest { file_id })
            .await?;

        Ok((StatusCode::OK, Json(FileRecordDto::from(response.file))))
    }
}
