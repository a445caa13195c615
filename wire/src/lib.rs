//! Shared HTTP wire schema for the chat relay.
//!
//! This crate owns the request/response bodies exchanged between `client`
//! and `server` so the two sides cannot drift apart. Field names follow the
//! JSON contract (`mimeType`), not Rust convention, where the two differ.

use serde::{Deserialize, Serialize};

/// Maximum number of file parts accepted by one multimodal request.
pub const MAX_FILES_PER_REQUEST: usize = 10;

/// A file already staged with the remote provider, identified by URI.
///
/// Produced by the server per uploaded file, in upload order, and echoed
/// back to the client for display. The URI is not re-fetchable through
/// this system.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Provider file URI, e.g. `https://.../files/abc123`.
    pub uri: String,
    /// MIME type the provider recorded for the file.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Display name, normally the original upload filename.
    pub name: String,
}

/// Body of `POST /api/chat` (text-only path).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Defaults to empty when absent so a missing prompt is rejected by
    /// the handler's validation (structured 400), not by deserialization.
    #[serde(default)]
    pub prompt: String,
    /// Passthrough generation configuration forwarded to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Success body of `POST /api/chat`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    /// Full provider response, retained for diagnostics and power users.
    pub raw: serde_json::Value,
}

/// Success body of `POST /api/chat-multimodal`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultimodalReply {
    pub text: String,
    /// Uploaded-file references in the same order the files were sent.
    pub files: Vec<AttachmentRef>,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthReply {
    pub ok: bool,
    /// Configured model identifier, reported even when no API key is set.
    pub model: String,
}

/// Structured JSON error body returned for every failed request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    /// Best-effort diagnostic detail; not a stable contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), detail: None }
    }

    #[must_use]
    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { error: error.into(), detail: Some(detail.into()) }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
