//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning errors since these endpoints are
//! only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>`: the server's `error` field when the
//! body carries one, otherwise a status-coded fallback. The caller rolls
//! back its optimistic message on any `Err`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::state::chat::{MessageAttachment, PendingAttachment};

#[cfg(any(test, feature = "hydrate"))]
fn send_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pull the server's `error` string out of a failure body, falling back
/// to a status-coded message when the body is not an error envelope.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_body(status: u16, body: &str) -> String {
    serde_json::from_str::<wire::ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| send_failed_message(status))
}

/// Map returned hosted-file references into message attachments.
#[must_use]
pub fn reply_attachments(files: Vec<wire::AttachmentRef>) -> Vec<MessageAttachment> {
    files
        .into_iter()
        .map(|f| {
            let name = if f.name.is_empty() { f.uri.clone() } else { f.name };
            MessageAttachment { name, uri: Some(f.uri) }
        })
        .collect()
}

/// `POST /api/chat` with a JSON body.
///
/// # Errors
///
/// Returns the server's error string, or a transport/status message.
pub async fn send_text(prompt: &str) -> Result<wire::ChatReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "prompt": prompt });
        let resp = gloo_net::http::Request::post("/api/chat")
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_body(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = prompt;
        Err("not available on server".to_owned())
    }
}

/// `POST /api/chat-multimodal` with `prompt` plus every attachment as a
/// `files` part, in order.
///
/// # Errors
///
/// Returns the server's error string, or a transport/status message.
pub async fn send_multimodal(
    prompt: &str,
    attachments: &[PendingAttachment],
) -> Result<wire::MultimodalReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let form = build_form(prompt, attachments)?;
        let resp = gloo_net::http::Request::post("/api/chat-multimodal")
            .body(form)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(error_from_body(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (prompt, attachments);
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
fn build_form(
    prompt: &str,
    attachments: &[PendingAttachment],
) -> Result<web_sys::FormData, String> {
    use crate::state::chat::SEND_FAILED_ERROR;

    let form = web_sys::FormData::new().map_err(|_| SEND_FAILED_ERROR.to_owned())?;
    form.append_with_str("prompt", prompt)
        .map_err(|_| SEND_FAILED_ERROR.to_owned())?;
    for attachment in attachments {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(attachment.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&attachment.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|_| SEND_FAILED_ERROR.to_owned())?;
        form.append_with_blob_and_filename("files", &blob, &attachment.name)
            .map_err(|_| SEND_FAILED_ERROR.to_owned())?;
    }
    Ok(form)
}
