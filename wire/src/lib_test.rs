use super::*;

// =============================================================================
// AttachmentRef
// =============================================================================

#[test]
fn attachment_ref_serializes_mime_type_as_camel_case() {
    let r = AttachmentRef {
        uri: "https://example.test/files/abc".into(),
        mime_type: "image/png".into(),
        name: "photo.png".into(),
    };
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["mimeType"], "image/png");
    assert!(json.get("mime_type").is_none());
}

#[test]
fn attachment_ref_round_trips() {
    let r = AttachmentRef {
        uri: "https://example.test/files/abc".into(),
        mime_type: "audio/webm".into(),
        name: "recording-123.webm".into(),
    };
    let json = serde_json::to_string(&r).unwrap();
    let back: AttachmentRef = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

// =============================================================================
// ChatRequest
// =============================================================================

#[test]
fn chat_request_omits_absent_config() {
    let req = ChatRequest { prompt: "hi".into(), config: None };
    let json = serde_json::to_string(&req).unwrap();
    assert!(!json.contains("config"));
}

#[test]
fn chat_request_parses_without_config() {
    let req: ChatRequest = serde_json::from_str(r#"{"prompt":"hello"}"#).unwrap();
    assert_eq!(req.prompt, "hello");
    assert!(req.config.is_none());
}

#[test]
fn chat_request_defaults_missing_prompt_to_empty() {
    let req: ChatRequest = serde_json::from_str("{}").unwrap();
    assert!(req.prompt.is_empty());
    assert!(req.config.is_none());
}

#[test]
fn chat_request_carries_passthrough_config() {
    let req: ChatRequest =
        serde_json::from_str(r#"{"prompt":"hello","config":{"temperature":0.2}}"#).unwrap();
    let config = req.config.unwrap();
    assert_eq!(config["temperature"], 0.2);
}

// =============================================================================
// ErrorBody
// =============================================================================

#[test]
fn error_body_omits_absent_detail() {
    let body = ErrorBody::new("failed to process request");
    let json = serde_json::to_string(&body).unwrap();
    assert!(!json.contains("detail"));
}

#[test]
fn error_body_includes_detail_when_present() {
    let body = ErrorBody::with_detail("failed to process request", "status 429");
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["error"], "failed to process request");
    assert_eq!(json["detail"], "status 429");
}

// =============================================================================
// MultimodalReply
// =============================================================================

#[test]
fn multimodal_reply_preserves_file_order() {
    let json = r#"{"text":"ok","files":[
        {"uri":"u1","mimeType":"image/png","name":"a.png"},
        {"uri":"u2","mimeType":"application/pdf","name":"b.pdf"}
    ]}"#;
    let reply: MultimodalReply = serde_json::from_str(json).unwrap();
    assert_eq!(reply.files.len(), 2);
    assert_eq!(reply.files[0].name, "a.png");
    assert_eq!(reply.files[1].name, "b.pdf");
}

#[test]
fn health_reply_round_trips() {
    let reply = HealthReply { ok: true, model: "gemini-2.5-flash".into() };
    let json = serde_json::to_string(&reply).unwrap();
    let back: HealthReply = serde_json::from_str(&json).unwrap();
    assert!(back.ok);
    assert_eq!(back.model, "gemini-2.5-flash");
}
