use super::*;
use crate::genai::{GenAi, GenAiError, GenerateReply, UploadedFile};
use crate::state::test_helpers;
use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

// =============================================================================
// MockGenAi
// =============================================================================

#[derive(Default)]
struct MockGenAi {
    fail_upload_at: Option<usize>,
    fail_generate: bool,
    uploads: Mutex<usize>,
    captured_config: Mutex<Option<serde_json::Value>>,
    reply_text: String,
}

impl MockGenAi {
    fn replying(text: &str) -> Self {
        Self { reply_text: text.to_owned(), ..Self::default() }
    }
}

#[async_trait::async_trait]
impl GenAi for MockGenAi {
    async fn upload_file(
        &self,
        _path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, GenAiError> {
        let mut count = self.uploads.lock().unwrap();
        if self.fail_upload_at == Some(*count) {
            return Err(GenAiError::ApiResponse { status: 500, body: "upload refused".into() });
        }
        *count += 1;
        let n = *count;
        Ok(UploadedFile {
            uri: format!("https://example.test/files/{n}"),
            mime_type: mime_type.to_owned(),
            name: display_name.to_owned(),
        })
    }

    async fn generate(
        &self,
        _parts: &[Part],
        config: Option<&serde_json::Value>,
    ) -> Result<GenerateReply, GenAiError> {
        if self.fail_generate {
            return Err(GenAiError::ApiResponse { status: 503, body: "overloaded".into() });
        }
        *self.captured_config.lock().unwrap() = config.cloned();
        Ok(GenerateReply { text: self.reply_text.clone(), raw: serde_json::json!({"mock": true}) })
    }
}

// =============================================================================
// Helpers
// =============================================================================

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn multipart_body(prompt: Option<&str>, files: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(prompt) = prompt {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{prompt}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, mime, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multimodal_request(prompt: Option<&str>, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat-multimodal")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(multipart_body(prompt, files)))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn staged_file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

// =============================================================================
// /health
// =============================================================================

#[tokio::test]
async fn health_reports_model_without_provider() {
    let dir = tempfile::tempdir().unwrap();
    let app = crate::routes::app(test_helpers::test_app_state(dir.path().to_path_buf()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["model"], "test-model");
}

// =============================================================================
// /api/chat
// =============================================================================

#[tokio::test]
async fn text_chat_empty_prompt_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path().to_path_buf());

    let body = ChatRequest { prompt: "   ".into(), config: None };
    let err = text_chat(State(state), Json(body)).await.unwrap_err();

    assert_eq!(err.0, StatusCode::BAD_REQUEST);
    assert_eq!(err.1.0.error, "prompt is required");
}

#[tokio::test]
async fn text_chat_missing_prompt_field_is_structured_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = crate::routes::app(test_helpers::test_app_state(dir.path().to_path_buf()));

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "prompt is required");
}

#[tokio::test]
async fn text_chat_without_provider_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state(dir.path().to_path_buf());

    let body = ChatRequest { prompt: "hello".into(), config: None };
    let err = text_chat(State(state), Json(body)).await.unwrap_err();

    assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn text_chat_returns_text_and_raw() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi::replying("Hi there."));
    let state = test_helpers::test_app_state_with_genai(mock, dir.path().to_path_buf());

    let body = ChatRequest { prompt: "hello".into(), config: None };
    let reply = text_chat(State(state), Json(body)).await.unwrap();

    assert_eq!(reply.0.text, "Hi there.");
    assert_eq!(reply.0.raw["mock"], true);
}

#[tokio::test]
async fn text_chat_forwards_passthrough_config() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi::replying("ok"));
    let state =
        test_helpers::test_app_state_with_genai(mock.clone(), dir.path().to_path_buf());

    let config = serde_json::json!({"temperature": 0.5});
    let body = ChatRequest { prompt: "hello".into(), config: Some(config.clone()) };
    text_chat(State(state), Json(body)).await.unwrap();

    assert_eq!(*mock.captured_config.lock().unwrap(), Some(config));
}

#[tokio::test]
async fn text_chat_provider_failure_is_generic_500() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi { fail_generate: true, ..MockGenAi::default() });
    let state = test_helpers::test_app_state_with_genai(mock, dir.path().to_path_buf());

    let body = ChatRequest { prompt: "hello".into(), config: None };
    let err = text_chat(State(state), Json(body)).await.unwrap_err();

    assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.1.0.error, GENERIC_ERROR);
    assert!(err.1.0.detail.is_some());
}

// =============================================================================
// /api/chat-multimodal
// =============================================================================

#[tokio::test]
async fn multimodal_success_returns_files_in_order_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi::replying("A red bicycle."));
    let app = crate::routes::app(test_helpers::test_app_state_with_genai(
        mock,
        dir.path().to_path_buf(),
    ));

    let request = multimodal_request(
        Some("Describe this image"),
        &[("bike.jpg", "image/jpeg", b"jpegdata"), ("notes.txt", "text/plain", b"hello")],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["text"], "A red bicycle.");
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "bike.jpg");
    assert_eq!(files[0]["mimeType"], "image/jpeg");
    assert_eq!(files[1]["name"], "notes.txt");

    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn multimodal_upload_failure_is_500_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi { fail_upload_at: Some(1), ..MockGenAi::default() });
    let app = crate::routes::app(test_helpers::test_app_state_with_genai(
        mock,
        dir.path().to_path_buf(),
    ));

    let request = multimodal_request(
        Some("look"),
        &[("a.png", "image/png", b"a"), ("b.png", "image/png", b"b")],
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"], GENERIC_ERROR);
    assert!(json["detail"].as_str().unwrap().contains("upload"));

    // Neither temp file remains on disk.
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn multimodal_generation_failure_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi { fail_generate: true, ..MockGenAi::default() });
    let app = crate::routes::app(test_helpers::test_app_state_with_genai(
        mock,
        dir.path().to_path_buf(),
    ));

    let request = multimodal_request(Some("look"), &[("a.png", "image/png", b"a")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn multimodal_over_file_cap_is_rejected_and_cleans_up() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockGenAi::replying("ok"));
    let app = crate::routes::app(test_helpers::test_app_state_with_genai(
        mock,
        dir.path().to_path_buf(),
    ));

    let payload: Vec<(String, &str, &[u8])> = (0..=wire::MAX_FILES_PER_REQUEST)
        .map(|i| (format!("f{i}.txt"), "text/plain", b"x".as_slice()))
        .collect();
    let files: Vec<(&str, &str, &[u8])> =
        payload.iter().map(|(n, m, b)| (n.as_str(), *m, *b)).collect();
    let response = app.oneshot(multimodal_request(Some("p"), &files)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("too many files"));
    assert_eq!(staged_file_count(dir.path()), 0);
}

#[tokio::test]
async fn multimodal_without_provider_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let app = crate::routes::app(test_helpers::test_app_state(dir.path().to_path_buf()));

    let request = multimodal_request(Some("p"), &[("a.txt", "text/plain", b"a")]);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Error translation
// =============================================================================

#[test]
fn relay_detail_labels_upload_and_generate() {
    let upload = RelayError::Upload(GenAiError::ApiRequest("boom".into()));
    assert!(relay_detail(&upload).starts_with("upload:"));

    let generate = RelayError::Generate(GenAiError::ApiRequest("boom".into()));
    assert!(relay_detail(&generate).starts_with("generate:"));
}

#[test]
fn processing_error_keeps_generic_message() {
    let (status, body) = processing_error("status 429");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.0.error, GENERIC_ERROR);
    assert_eq!(body.0.detail.as_deref(), Some("status 429"));
}
