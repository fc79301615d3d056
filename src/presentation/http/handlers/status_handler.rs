use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::StatusCheckUseCase;
use crate::presentation::http::dto::{StatusCheckCreateDto, StatusCheckDto};
use crate::presentation::http::errors::ApiError;

pub struct StatusHandler {
    status_check_use_case: Arc<StatusCheckUseCase>,
}

impl StatusHandler {
    pub fn new(status_check_use_case: Arc<StatusCheckUseCase>) -> Self {
        Self {
            status_check_use_case,
        }
    }

    pub async fn create_status_check(
        State(handler): State<Arc<StatusHandler>>,
        Json(input): Json<StatusCheckCreateDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let status_check = handler
            .status_check_use_case
            .record(input.client_name)
            .await?;

        Ok((StatusCode::OK, Json(StatusCheckDto::from(status_check))))
    }

    pub async fn list_status_checks(
        State(handler): State<Arc<StatusHandler>>,
    ) -> Result<impl IntoResponse, ApiError> {
        let status_checks: Vec<StatusCheckDto> = handler
            .status_check_use_case
            .list()
            .await?
            .into_iter()
            .map(StatusCheckDto::from)
            .collect();

        Ok((StatusCode::OK, Json(status_checks)))
    }
}
