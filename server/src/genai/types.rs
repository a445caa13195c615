//! Provider-neutral generation types and errors.
//!
//! Shared by the Gemini client and the relay service. The `GenAi` trait is
//! the seam that lets the relay pipeline run against a mock in tests.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by provider client operations.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// No API key found in any of the accepted environment variables.
    #[error("missing API key: none of {tried} is set")]
    MissingApiKey { tried: String },

    /// A local staged file could not be read for upload.
    #[error("file read failed: {0}")]
    FileRead(String),

    /// The HTTP request to the provider failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONTENT PARTS
// =============================================================================

/// One element of the ordered content payload sent to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// Plain prompt text.
    Text(String),
    /// Reference to a file already staged with the provider.
    FileData { uri: String, mime_type: String },
}

/// A file the provider has accepted and assigned a URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub uri: String,
    pub mime_type: String,
    /// Display name; falls back to the provider resource name.
    pub name: String,
}

/// Result of one generation call.
#[derive(Debug)]
pub struct GenerateReply {
    /// Concatenated text of the first candidate's text parts.
    pub text: String,
    /// The full provider response body.
    pub raw: serde_json::Value,
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// Provider-neutral async interface for file staging and generation.
#[async_trait::async_trait]
pub trait GenAi: Send + Sync {
    /// Upload one local file to the provider's file-hosting service.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the file cannot be read or the provider
    /// rejects the upload.
    async fn upload_file(
        &self,
        path: &std::path::Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, GenAiError>;

    /// Run one generation call over an ordered content payload.
    ///
    /// # Errors
    ///
    /// Returns a [`GenAiError`] if the request fails or the response is
    /// malformed.
    async fn generate(
        &self,
        parts: &[Part],
        config: Option<&serde_json::Value>,
    ) -> Result<GenerateReply, GenAiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
