pub mod file_record_model;
pub mod status_check_model;

pub use file_record_model::*;
pub use status_check_model::*;
