use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, Error as ReqwestError, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use std::future::Future;
use std::time::Duration;

use crate::application::ports::GenerativeModel;
use crate::application::ports::generative_model::GenerativeModelError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
    /// Files up to this size travel inline with the prompt, larger ones go
    /// through the Files API first.
    pub max_inline_bytes: usize,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 120,
            max_retries: 1,
            backoff_factor: 2.0,
            max_inline_bytes: 20 * 1024 * 1024,
        }
    }
}

/// `generateContent` client for Gemini models. Small files are sent inline
/// next to the prompt; larger ones are uploaded and referenced by URI.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url(),
            self.config.model
        )
    }

    fn upload_endpoint(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url())
    }

    async fn with_retries<T, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, GenerativeModelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GenerativeModelError>>,
    {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempts <= self.config.max_retries => {
                    let backoff_time = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    tracing::warn!(
                        "Gemini {} attempt {} failed: {}, retrying in {} ms",
                        operation,
                        attempts,
                        e,
                        backoff_time.as_millis()
                    );
                    tokio::time::sleep(backoff_time).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn execute_request(&self, api_key: &str, body: &Value) -> Result<String, GenerativeModelError> {
        let request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body);

        let payload = send_json(request).await?;
        extract_text(&payload)
    }

    /// Resumable upload through the Files API. Returns the URI the uploaded
    /// file can be referenced by in `generateContent`.
    async fn upload_file(
        &self,
        api_key: &str,
        data: &[u8],
        mime_type: &str,
        display_name: &str,
    ) -> Result<String, GenerativeModelError> {
        let start = self
            .client
            .post(self.upload_endpoint())
            .header("x-goog-api-key", api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header("X-Goog-Upload-Header-Content-Length", data.len().to_string())
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&json!({ "file": { "display_name": display_name } }))
            .send()
            .await
            .map_err(|e| GenerativeModelError::NetworkError(e.without_url().to_string()))?;

        let start = check_status(start).await?;
        let session_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                GenerativeModelError::InvalidResponse("Upload session has no URL".to_string())
            })?;

        let finish = self
            .client
            .post(session_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(data.to_vec());

        let payload = send_json(finish).await?;
        let uri = payload
            .pointer("/file/uri")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GenerativeModelError::InvalidResponse("Uploaded file has no URI".to_string())
            })?;

        tracing::info!("Uploaded {} ({} bytes) to the Gemini Files API", display_name, data.len());
        Ok(uri.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerativeModelError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(GenerativeModelError::RateLimitExceeded);
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(GenerativeModelError::ApiError {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

async fn send_json(request: RequestBuilder) -> Result<Value, GenerativeModelError> {
    let response = request
        .send()
        .await
        .map_err(|e| GenerativeModelError::NetworkError(e.without_url().to_string()))?;

    check_status(response)
        .await?
        .json::<Value>()
        .await
        .map_err(|e| GenerativeModelError::InvalidResponse(e.to_string()))
}

fn inline_part(data: &[u8], mime_type: &str) -> Value {
    let encoded = base64::engine::general_purpose::STANDARD.encode(data);
    json!({ "inline_data": { "mime_type": mime_type, "data": encoded } })
}

fn file_part(file_uri: &str, mime_type: &str) -> Value {
    json!({ "file_data": { "mime_type": mime_type, "file_uri": file_uri } })
}

fn build_request_body(prompt: &str, media_part: Value) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                media_part,
                { "text": prompt }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

/// Concatenates the text parts of the first candidate.
fn extract_text(payload: &Value) -> Result<String, GenerativeModelError> {
    let parts = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GenerativeModelError::InvalidResponse("Response has no candidate content".to_string())
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(GenerativeModelError::InvalidResponse(
            "Response has no text parts".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        data: &[u8],
        mime_type: &str,
    ) -> Result<String, GenerativeModelError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerativeModelError::NotConfigured("GEMINI_API_KEY is not set".to_string()))?;

        let media_part = if data.len() > self.config.max_inline_bytes {
            let display_name = format!("upload-{}", uuid::Uuid::new_v4());
            let file_uri = self
                .with_retries("file upload", || {
                    self.upload_file(api_key, data, mime_type, &display_name)
                })
                .await?;
            file_part(&file_uri, mime_type)
        } else {
            inline_part(data, mime_type)
        };

        let body = build_request_body(prompt, media_part);
        self.with_retries("generateContent", || self.execute_request(api_key, &body))
            .await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        body::Bytes,
        extract::State,
        http::HeaderMap,
        response::IntoResponse,
        routing::post,
    };
    use std::sync::{Arc, Mutex};

    fn client(config: GeminiClientConfig) -> GeminiClient {
        GeminiClient::new(GeminiClientConfig {
            // Nothing listens here; tests below must fail before any request.
            base_url: "http://127.0.0.1:9".to_string(),
            ..config
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(GeminiClientConfig {
            base_url: "https://example.test/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_carries_prompt_and_inline_data() {
        let body = build_request_body("Describe it", inline_part(b"abc", "image/png"));

        let parts = body.pointer("/contents/0/parts").unwrap().as_array().unwrap();
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], "Describe it");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }
            }]
        });

        assert_eq!(extract_text(&payload).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_rejects_empty_response() {
        assert!(matches!(
            extract_text(&json!({ "candidates": [] })),
            Err(GenerativeModelError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })),
            Err(GenerativeModelError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_request() {
        let client = client(GeminiClientConfig::default());

        let result = client.generate("prompt", b"data", "text/plain").await;

        assert!(matches!(result, Err(GenerativeModelError::NotConfigured(_))));
    }

    #[test]
    fn test_request_body_references_uploaded_file() {
        let body = build_request_body(
            "Describe it",
            file_part("https://files.test/v1beta/files/abc", "video/mp4"),
        );

        let parts = body.pointer("/contents/0/parts").unwrap().as_array().unwrap();
        assert_eq!(parts[0]["file_data"]["file_uri"], "https://files.test/v1beta/files/abc");
        assert_eq!(parts[0]["file_data"]["mime_type"], "video/mp4");
        assert!(parts[0].get("inline_data").is_none());
        assert_eq!(parts[1]["text"], "Describe it");
    }

    #[derive(Clone, Default)]
    struct FakeGemini {
        base_url: String,
        uploaded: Arc<Mutex<Vec<u8>>>,
        generate_body: Arc<Mutex<Option<Value>>>,
    }

    async fn start_upload(State(fake): State<FakeGemini>, headers: HeaderMap) -> impl IntoResponse {
        assert_eq!(headers["x-goog-upload-command"], "start");
        assert_eq!(headers["x-goog-api-key"], "key");
        [("x-goog-upload-url", format!("{}/upload-session", fake.base_url))]
    }

    async fn finish_upload(State(fake): State<FakeGemini>, body: Bytes) -> Json<Value> {
        *fake.uploaded.lock().unwrap() = body.to_vec();
        Json(json!({ "file": { "uri": "https://files.test/v1beta/files/abc" } }))
    }

    async fn generate_content(State(fake): State<FakeGemini>, Json(body): Json<Value>) -> Json<Value> {
        *fake.generate_body.lock().unwrap() = Some(body);
        Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"classification\":\"video\"}" }] } }]
        }))
    }

    async fn spawn_fake_gemini() -> FakeGemini {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let fake = FakeGemini {
            base_url: format!("http://{}", listener.local_addr().unwrap()),
            ..Default::default()
        };

        let app = Router::new()
            .route("/upload/v1beta/files", post(start_upload))
            .route("/upload-session", post(finish_upload))
            .fallback(generate_content)
            .with_state(fake.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        fake
    }

    #[tokio::test]
    async fn test_oversized_file_goes_through_files_api() {
        let fake = spawn_fake_gemini().await;
        let client = GeminiClient::new(GeminiClientConfig {
            api_key: Some("key".to_string()),
            base_url: fake.base_url.clone(),
            max_retries: 0,
            max_inline_bytes: 4,
            ..Default::default()
        })
        .unwrap();

        let text = client.generate("prompt", b"12345", "video/mp4").await.unwrap();

        assert_eq!(text, "{\"classification\":\"video\"}");
        assert_eq!(*fake.uploaded.lock().unwrap(), b"12345".to_vec());
        let body = fake.generate_body.lock().unwrap().clone().unwrap();
        let media = &body["contents"][0]["parts"][0];
        assert_eq!(media["file_data"]["file_uri"], "https://files.test/v1beta/files/abc");
        assert!(media.get("inline_data").is_none());
    }

    #[tokio::test]
    async fn test_small_file_stays_inline() {
        let fake = spawn_fake_gemini().await;
        let client = GeminiClient::new(GeminiClientConfig {
            api_key: Some("key".to_string()),
            base_url: fake.base_url.clone(),
            max_retries: 0,
            ..Default::default()
        })
        .unwrap();

        client.generate("prompt", b"abc", "text/plain").await.unwrap();

        assert!(fake.uploaded.lock().unwrap().is_empty());
        let body = fake.generate_body.lock().unwrap().clone().unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["inline_data"]["data"], "YWJj");
    }

    #[test]
    fn test_model_name_is_configured_model() {
        let client = client(GeminiClientConfig {
            model: "gemini-test".to_string(),
            ..Default::default()
        });

        assert_eq!(client.model_name(), "gemini-test");
    }
}
