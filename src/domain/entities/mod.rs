pub mod file_record;
pub mod search_criteria;
pub mod status_check;

pub use file_record::{FileRecord, NewFileRecord};
pub use search_criteria::SearchCriteria;
pub use status_check::StatusCheck;
