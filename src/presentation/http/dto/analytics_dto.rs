use serde::Serialize;

use crate::application::use_cases::get_analytics::GetAnalyticsResponse;
use crate::domain::repositories::ValueCount;

#[derive(Debug, Serialize)]
pub struct AnalyticsResponseDto {
    pub total_files: i64,
    pub file_type_distribution: Vec<ValueCount>,
    pub top_tags: Vec<ValueCount>,
    pub ai_analysis_rate: String,
}

impl From<GetAnalyticsResponse> for AnalyticsResponseDto {
    fn from(response: GetAnalyticsResponse) -> Self {
        Self {
            total_files: response.total_files,
            file_type_distribution: response.file_type_distribution,
            top_tags: response.top_tags,
            ai_analysis_rate: response.ai_analysis_rate,
        }
    }
}
