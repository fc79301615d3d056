/// Guess a MIME type from the extension of a client-supplied filename.
/// The bytes themselves are never inspected.
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

/// Which analysis prompt family a content type falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisProfile {
    Image,
    Document,
    Generic,
}

impl AnalysisProfile {
    pub fn for_content_type(content_type: &str) -> Self {
        if content_type.starts_with("image/") {
            AnalysisProfile::Image
        } else if content_type == "application/pdf" || content_type.starts_with("text/") {
            AnalysisProfile::Document
        } else {
            AnalysisProfile::Generic
        }
    }

    /// Keys the model is asked to return for this profile.
    pub fn response_keys(&self) -> &'static [&'static str] {
        match self {
            AnalysisProfile::Image => &[
                "classification",
                "description",
                "key_subjects",
                "tags",
                "text_content",
                "quality",
            ],
            AnalysisProfile::Document => &[
                "classification",
                "key_topics",
                "summary",
                "entities",
                "tags",
                "language_analysis",
            ],
            AnalysisProfile::Generic => &["classification", "key_info", "summary", "tags", "metadata"],
        }
    }
}
