pub mod content_analyzer;

pub use content_analyzer::ContentAnalyzer;
