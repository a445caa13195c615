//! Gemini REST client: Files API upload + `generateContent`.
//!
//! DESIGN
//! ======
//! Thin HTTP wrapper over the public REST surface. Request bodies are built
//! from provider-neutral [`Part`] values; response handling is split into
//! pure `parse_*` functions for testability. Files are staged with the
//! provider's file-hosting endpoint first, then referenced by URI in the
//! generation call.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use super::config::GenAiConfig;
use super::types::{GenAi, GenAiError, GenerateReply, Part, UploadedFile};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const UPLOAD_BASE: &str = "https://generativelanguage.googleapis.com/upload/v1beta";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: GenAiConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GenAiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, model: config.model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl GenAi for GeminiClient {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, GenAiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GenAiError::FileRead(e.to_string()))?;

        let url = format!("{UPLOAD_BASE}/files?key={}", self.api_key);
        let metadata = upload_metadata(display_name);
        let media = reqwest::multipart::Part::bytes(bytes)
            .file_name(display_name.to_owned())
            .mime_str(mime_type)
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("metadata", metadata.to_string())
            .part("file", media);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(GenAiError::ApiResponse { status, body: text });
        }

        parse_upload_response(&text)
    }

    async fn generate(
        &self,
        parts: &[Part],
        config: Option<&serde_json::Value>,
    ) -> Result<GenerateReply, GenAiError> {
        let url = format!("{API_BASE}/models/{}:generateContent?key={}", self.model, self.api_key);
        let body = generate_request_body(parts, config);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| GenAiError::ApiRequest(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(GenAiError::ApiResponse { status, body: text });
        }

        parse_generate_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Serialize)]
struct FileData {
    #[serde(rename = "fileUri")]
    file_uri: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

// =============================================================================
// REQUEST BUILDING
// =============================================================================

fn upload_metadata(display_name: &str) -> serde_json::Value {
    serde_json::json!({ "file": { "displayName": display_name } })
}

fn generate_request_body(parts: &[Part], config: Option<&serde_json::Value>) -> serde_json::Value {
    let wire_parts: Vec<WirePart> = parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => WirePart::Text { text: text.clone() },
            Part::FileData { uri, mime_type } => WirePart::FileData {
                file_data: FileData { file_uri: uri.clone(), mime_type: mime_type.clone() },
            },
        })
        .collect();

    let request = GenerateRequest {
        contents: vec![Content { role: "user", parts: wire_parts }],
        generation_config: config.cloned(),
    };
    // GenerateRequest contains only serializable leaves; this cannot fail.
    serde_json::to_value(request).unwrap_or_default()
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn parse_upload_response(json: &str) -> Result<UploadedFile, GenAiError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| GenAiError::ApiParse(e.to_string()))?;
    let file = value
        .get("file")
        .ok_or_else(|| GenAiError::ApiParse("upload response missing 'file'".into()))?;

    let uri = file
        .get("uri")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GenAiError::ApiParse("upload response missing 'file.uri'".into()))?
        .to_owned();
    let mime_type = file
        .get("mimeType")
        .and_then(|v| v.as_str())
        .unwrap_or("application/octet-stream")
        .to_owned();
    let name = file
        .get("displayName")
        .or_else(|| file.get("name"))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_owned();

    Ok(UploadedFile { uri, mime_type, name })
}

fn parse_generate_response(json: &str) -> Result<GenerateReply, GenAiError> {
    let raw: serde_json::Value =
        serde_json::from_str(json).map_err(|e| GenAiError::ApiParse(e.to_string()))?;

    // Some failures arrive as 200 bodies carrying an `error` object.
    if let Some(error) = raw.get("error") {
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown provider error");
        return Err(GenAiError::ApiParse(message.to_owned()));
    }

    let text = raw
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(GenerateReply { text, raw })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
