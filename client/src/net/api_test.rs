use super::*;

#[test]
fn send_failed_message_formats_status() {
    assert_eq!(send_failed_message(500), "request failed: 500");
}

#[test]
fn error_from_body_prefers_server_error_field() {
    let body = r#"{"error":"prompt is required"}"#;
    assert_eq!(error_from_body(400, body), "prompt is required");
}

#[test]
fn error_from_body_falls_back_on_garbage() {
    assert_eq!(error_from_body(502, "<html>bad gateway</html>"), "request failed: 502");
    assert_eq!(error_from_body(500, ""), "request failed: 500");
}

#[test]
fn reply_attachments_keeps_order_and_uris() {
    let refs = vec![
        wire::AttachmentRef {
            uri: "https://h/f1".into(),
            mime_type: "image/png".into(),
            name: "a.png".into(),
        },
        wire::AttachmentRef {
            uri: "https://h/f2".into(),
            mime_type: "audio/webm".into(),
            name: "b.webm".into(),
        },
    ];

    let mapped = reply_attachments(refs);

    assert_eq!(mapped.len(), 2);
    assert_eq!(mapped[0].name, "a.png");
    assert_eq!(mapped[0].uri.as_deref(), Some("https://h/f1"));
    assert_eq!(mapped[1].name, "b.webm");
}

#[test]
fn reply_attachments_falls_back_to_uri_as_name() {
    let refs = vec![wire::AttachmentRef {
        uri: "https://h/f1".into(),
        mime_type: "image/png".into(),
        name: String::new(),
    }];
    assert_eq!(reply_attachments(refs)[0].name, "https://h/f1");
}
