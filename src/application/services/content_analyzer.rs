use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::application::ports::GenerativeModel;
use crate::domain::value_objects::{AnalysisProfile, AnalysisResult, Confidence};

/// Turns an uploaded file into an [`AnalysisResult`] with the help of an
/// external model.
///
/// `analyze` never fails. When the model is unreachable or answers with
/// something that is not a JSON object, a low-confidence fallback record
/// takes the place of the model's answer.
pub struct ContentAnalyzer {
    model: Arc<dyn GenerativeModel>,
}

impl ContentAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn analyze(
        &self,
        data: &[u8],
        content_type: &str,
        original_filename: &str,
    ) -> AnalysisResult {
        let profile = AnalysisProfile::for_content_type(content_type);
        let prompt = build_prompt(profile, original_filename);

        let (mut analysis, confidence) =
            match self.model.generate(&prompt, data, content_type).await {
                Ok(raw_response) => interpret_response(&raw_response, original_filename),
                Err(e) => {
                    tracing::error!("AI analysis failed for {}: {}", original_filename, e);
                    (
                        AnalysisResult::unavailable(original_filename, &e.to_string()),
                        Confidence::Low,
                    )
                }
            };

        analysis.stamp(self.model.model_name(), confidence, Utc::now());
        analysis
    }
}

fn interpret_response(raw_response: &str, original_filename: &str) -> (AnalysisResult, Confidence) {
    match serde_json::from_str::<Value>(raw_response) {
        Ok(Value::Object(fields)) => (AnalysisResult::from_fields(fields), Confidence::High),
        _ => {
            tracing::warn!(
                "Model response for {} is not a JSON object, storing raw text",
                original_filename
            );
            (AnalysisResult::unparsable(raw_response), Confidence::Low)
        }
    }
}

pub fn build_prompt(profile: AnalysisProfile, original_filename: &str) -> String {
    let (subject, instructions) = match profile {
        AnalysisProfile::Image => (
            format!("Analyze this image file '{}' and provide:", original_filename),
            [
                "Content classification (what type of image it is)",
                "Visual description (what's in the image)",
                "Key objects or subjects identified",
                "Suggested tags for easy searching",
                "Any text content if visible",
                "Overall quality assessment",
            ]
            .as_slice(),
        ),
        AnalysisProfile::Document => (
            format!("Analyze this document '{}' and provide:", original_filename),
            [
                "Document classification (type/category)",
                "Key topics and themes",
                "Summary of main content",
                "Important entities (names, dates, places, organizations)",
                "Suggested tags for easy searching",
                "Readability and language analysis",
            ]
            .as_slice(),
        ),
        AnalysisProfile::Generic => (
            format!("Analyze this file '{}' and provide:", original_filename),
            [
                "File classification and type",
                "Key information extracted",
                "Summary of content",
                "Suggested tags for searching",
                "Any metadata insights",
            ]
            .as_slice(),
        ),
    };

    let mut prompt = subject;
    for (i, instruction) in instructions.iter().enumerate() {
        prompt.push_str(&format!("\n{}. {}", i + 1, instruction));
    }
    prompt.push_str(&format!(
        "\n\nFormat your response as JSON with keys: {}.",
        profile.response_keys().join(", ")
    ));
    prompt
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::generative_model::GenerativeModelError;

    pub(crate) enum ScriptedReply {
        Text(String),
        Failure,
    }

    /// Model double that returns a fixed reply and records the prompts it saw.
    pub(crate) struct ScriptedModel {
        reply: ScriptedReply,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedModel {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: ScriptedReply::Text(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                reply: ScriptedReply::Failure,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(
            &self,
            prompt: &str,
            _data: &[u8],
            mime_type: &str,
        ) -> Result<String, GenerativeModelError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), mime_type.to_string()));
            match &self.reply {
                ScriptedReply::Text(text) => Ok(text.clone()),
                ScriptedReply::Failure => Err(GenerativeModelError::NetworkError(
                    "connection refused".to_string(),
                )),
            }
        }

        fn model_name(&self) -> &str {
            "scripted-model"
        }
    }

    #[tokio::test]
    async fn test_valid_json_is_high_confidence() {
        let model = Arc::new(ScriptedModel::replying(
            r#"{"classification":"photo","tags":["animal"]}"#,
        ));
        let analyzer = ContentAnalyzer::new(model);

        let analysis = analyzer.analyze(b"jpeg", "image/jpeg", "cat.jpg").await;

        assert_eq!(analysis.classification(), Some("photo"));
        assert_eq!(analysis.confidence(), Some(Confidence::High));
        assert_eq!(
            analysis.get("ai_model").and_then(Value::as_str),
            Some("scripted-model")
        );
        assert!(analysis.get("analyzed_at").is_some());
        assert!(analysis.suggested_tags().contains("animal"));
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let raw = format!("Sure! Here is the analysis: {}", "z".repeat(600));
        let analyzer = ContentAnalyzer::new(Arc::new(ScriptedModel::replying(&raw)));

        let analysis = analyzer.analyze(b"%PDF", "application/pdf", "doc.pdf").await;

        assert_eq!(analysis.classification(), Some("Unknown"));
        assert_eq!(analysis.confidence(), Some(Confidence::Low));
        assert_eq!(analysis.summary().unwrap().chars().count(), 503);
        assert!(analysis.summary().unwrap().ends_with("..."));
        assert_eq!(analysis.get("raw_response").and_then(Value::as_str), Some(raw.as_str()));
        assert!(analysis.suggested_tags().contains("ai-analyzed"));
    }

    #[tokio::test]
    async fn test_json_array_output_is_treated_as_malformed() {
        let analyzer = ContentAnalyzer::new(Arc::new(ScriptedModel::replying(r#"["a","b"]"#)));

        let analysis = analyzer.analyze(b"", "text/plain", "a.txt").await;

        assert_eq!(analysis.classification(), Some("Unknown"));
        assert!(analysis.get("raw_response").is_some());
    }

    #[tokio::test]
    async fn test_call_failure_is_absorbed() {
        let analyzer = ContentAnalyzer::new(Arc::new(ScriptedModel::failing()));

        let analysis = analyzer.analyze(b"data", "application/zip", "bundle.zip").await;

        assert_eq!(analysis.confidence(), Some(Confidence::Low));
        assert_eq!(analysis.summary(), Some("AI analysis unavailable for bundle.zip"));
        assert_eq!(
            analysis.get("error").and_then(Value::as_str),
            Some("Network error: connection refused")
        );
        let tags = analysis.suggested_tags();
        assert!(tags.contains("uploaded"));
        assert!(tags.contains("analysis-failed"));
    }

    #[tokio::test]
    async fn test_prompt_follows_content_type() {
        let model = Arc::new(ScriptedModel::replying("{}"));
        let analyzer = ContentAnalyzer::new(model.clone());

        analyzer.analyze(b"", "image/png", "a.png").await;
        analyzer.analyze(b"", "text/csv", "b.csv").await;
        analyzer.analyze(b"", "application/zip", "c.zip").await;

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].0.contains("image file 'a.png'"));
        assert!(prompts[0].0.contains("key_subjects, tags, text_content, quality"));
        assert_eq!(prompts[0].1, "image/png");
        assert!(prompts[1].0.contains("document 'b.csv'"));
        assert!(prompts[1].0.contains("language_analysis"));
        assert!(prompts[2].0.contains("file 'c.zip'"));
        assert!(prompts[2].0.contains("key_info, summary, tags, metadata"));
    }
}
