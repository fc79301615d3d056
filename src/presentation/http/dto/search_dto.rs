use serde::Deserialize;

use crate::application::use_cases::search_files::SearchFilesRequest;

#[derive(Debug, Deserialize)]
pub struct SearchRequestDto {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub file_types: Option<Vec<String>>,
}

impl From<SearchRequestDto> for SearchFilesRequest {
    fn from(dto: SearchRequestDto) -> Self {
        Self {
            query: dto.query,
            tags: dto.tags,
            file_types: dto.file_types,
        }
    }
}
