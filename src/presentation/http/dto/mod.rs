pub mod analytics_dto;
pub mod file_dto;
pub mod response_dto;
pub mod search_dto;
pub mod status_dto;

pub use analytics_dto::*;
pub use file_dto::*;
pub use response_dto::*;
pub use search_dto::*;
pub use status_dto::*;
