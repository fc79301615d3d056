pub mod analysis_result;
pub mod content_type;
pub mod tag_set;

pub use analysis_result::{AnalysisResult, Confidence};
pub use content_type::{AnalysisProfile, guess_content_type};
pub use tag_set::TagSet;
