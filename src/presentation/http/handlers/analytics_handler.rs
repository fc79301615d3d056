use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::use_cases::GetAnalyticsUseCase;
use crate::presentation::http::dto::AnalyticsResponseDto;
use crate::presentation::http::errors::ApiError;

pub struct AnalyticsHandler {
    analytics_use_case: Arc<GetAnalyticsUseCase>,
}

impl AnalyticsHandler {
    pub fn new(analytics_use_case: Arc<GetAnalyticsUseCase>) -> Self {
        Self { analytics_use_case }
    }

    pub async fn get_analytics(
        State(handler): State<Arc<AnalyticsHandler>>,
    ) -> Result<impl IntoResponse, ApiError> {
        let response = handler.analytics_use_case.execute().await?;
        Ok((StatusCode::OK, Json(AnalyticsResponseDto::from(response))))
    }
}
