use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct BannerResponseDto {
    pub message: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}
