use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::TagSet;

pub const UNKNOWN_CLASSIFICATION: &str = "Unknown";
pub const SUMMARY_CHAR_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semi-structured analysis attached to every file record.
///
/// The key set depends on the content type and on whether the model
/// produced usable output, so it is kept as a JSON object rather than a
/// fixed struct. Accessors cover the handful of keys the rest of the
/// system reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult {
    fields: Map<String, Value>,
}

impl AnalysisResult {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Fallback for model output that is not a JSON object. The raw text is
    /// kept under `raw_response` so nothing the model said is lost.
    pub fn unparsable(raw_response: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("classification".into(), Value::from(UNKNOWN_CLASSIFICATION));
        fields.insert("summary".into(), Value::from(truncate_summary(raw_response)));
        fields.insert("tags".into(), Value::from(vec!["ai-analyzed", "uploaded"]));
        fields.insert("raw_response".into(), Value::from(raw_response));
        Self { fields }
    }

    /// Fallback for a model call that never produced output.
    pub fn unavailable(original_filename: &str, error: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("classification".into(), Value::from(UNKNOWN_CLASSIFICATION));
        fields.insert(
            "summary".into(),
            Value::from(format!("AI analysis unavailable for {}", original_filename)),
        );
        fields.insert("tags".into(), Value::from(vec!["uploaded", "analysis-failed"]));
        fields.insert("error".into(), Value::from(error));
        Self { fields }
    }

    /// Records when, by which model and with what confidence the analysis
    /// was produced. Overwrites same-named keys returned by the model.
    pub fn stamp(&mut self, model: &str, confidence: Confidence, analyzed_at: DateTime<Utc>) {
        self.fields
            .insert("analyzed_at".into(), Value::from(analyzed_at.to_rfc3339()));
        self.fields.insert("ai_model".into(), Value::from(model));
        self.fields
            .insert("confidence".into(), Value::from(confidence.as_str()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn classification(&self) -> Option<&str> {
        self.get("classification").and_then(Value::as_str)
    }

    pub fn summary(&self) -> Option<&str> {
        self.get("summary").and_then(Value::as_str)
    }

    pub fn confidence(&self) -> Option<Confidence> {
        match self.get("confidence").and_then(Value::as_str) {
            Some("high") => Some(Confidence::High),
            Some("low") => Some(Confidence::Low),
            _ => None,
        }
    }

    /// String entries of the `tags` key. Anything else the model put there
    /// is ignored.
    pub fn suggested_tags(&self) -> TagSet {
        match self.get("tags") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => TagSet::new(),
        }
    }

}

impl TryFrom<Value> for AnalysisResult {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err("Analysis must be a JSON object".to_string()),
        }
    }
}

impl From<AnalysisResult> for Value {
    fn from(analysis: AnalysisResult) -> Self {
        Value::Object(analysis.fields)
    }
}

fn truncate_summary(text: &str) -> String {
    match text.char_indices().nth(SUMMARY_CHAR_LIMIT) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
