//! Chat endpoints: health, text-only chat, multimodal chat.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is translated here into a `(status, ErrorBody)` pair; no
//! provider error or panic message crosses the HTTP boundary raw. Upload
//! staging is cleaned up unconditionally — success, provider failure, or
//! malformed request — before the response leaves the handler.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use tracing::{error, info};

use wire::{
    ChatReply, ChatRequest, ErrorBody, HealthReply, MAX_FILES_PER_REQUEST, MultimodalReply,
};

use crate::genai::Part;
use crate::services::relay::{self, RelayError};
use crate::services::staging::{self, StagedFile};
use crate::state::AppState;

/// Stable message for any upstream processing failure.
const GENERIC_ERROR: &str = "failed to process request";

type ApiFailure = (StatusCode, Json<ErrorBody>);

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /health` — readiness plus the configured model identifier.
pub async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply { ok: true, model: state.model })
}

/// `POST /api/chat` — text-only generation.
pub async fn text_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiFailure> {
    let prompt = body.prompt.trim();
    if prompt.is_empty() {
        return Err(bad_request("prompt is required"));
    }
    let genai = state.genai.as_ref().ok_or_else(provider_unconfigured)?;

    let parts = [Part::Text(prompt.to_owned())];
    let reply = genai
        .generate(&parts, body.config.as_ref())
        .await
        .map_err(|e| processing_error(&e.to_string()))?;

    Ok(Json(ChatReply { text: reply.text, raw: reply.raw }))
}

/// `POST /api/chat-multimodal` — prompt plus up to
/// [`MAX_FILES_PER_REQUEST`] file parts.
pub async fn multimodal_chat(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MultimodalReply>, ApiFailure> {
    let Some(genai) = state.genai.clone() else {
        return Err(provider_unconfigured());
    };

    let mut prompt = String::new();
    let mut staged: Vec<StagedFile> = Vec::new();
    let collected = collect_multipart(&state, &mut multipart, &mut prompt, &mut staged).await;
    if let Err(failure) = collected {
        staging::cleanup(&staged).await;
        return Err(failure);
    }

    info!(files = staged.len(), prompt_len = prompt.len(), "multimodal chat request");

    let result = relay::run_multimodal(&genai, &prompt, &staged).await;
    // Cleanup runs whether generation succeeded or not.
    staging::cleanup(&staged).await;

    match result {
        Ok(outcome) => {
            let files = outcome
                .files
                .into_iter()
                .map(|f| wire::AttachmentRef { uri: f.uri, mime_type: f.mime_type, name: f.name })
                .collect();
            Ok(Json(MultimodalReply { text: outcome.text, files }))
        }
        Err(e) => {
            error!(error = %e, "multimodal relay failed");
            Err(processing_error(&relay_detail(&e)))
        }
    }
}

// =============================================================================
// MULTIPART COLLECTION
// =============================================================================

/// Drain the multipart stream into a prompt string and staged files,
/// preserving file arrival order.
async fn collect_multipart(
    state: &AppState,
    multipart: &mut Multipart,
    prompt: &mut String,
    staged: &mut Vec<StagedFile>,
) -> Result<(), ApiFailure> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| bad_request(&format!("malformed multipart body: {e}")))?;
        let Some(field) = field else { break };

        match field.name() {
            Some("prompt") => {
                *prompt = field
                    .text()
                    .await
                    .map_err(|e| bad_request(&format!("invalid prompt field: {e}")))?;
            }
            Some("files") => {
                if staged.len() >= MAX_FILES_PER_REQUEST {
                    return Err(bad_request(&format!(
                        "too many files (max {MAX_FILES_PER_REQUEST})"
                    )));
                }
                let display_name = field.file_name().unwrap_or("file").to_owned();
                let mime_type = field.content_type().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(&format!("invalid file part: {e}")))?;

                let file =
                    staging::stage_bytes(&state.upload_dir, &display_name, mime_type.as_deref(), &bytes)
                        .await
                        .map_err(|e| {
                            error!(error = %e, "upload staging failed");
                            processing_error("could not stage uploaded file")
                        })?;
                staged.push(file);
            }
            // Unknown fields are ignored, matching lenient form handling.
            _ => {}
        }
    }
    Ok(())
}

// =============================================================================
// ERROR TRANSLATION
// =============================================================================

fn bad_request(message: &str) -> ApiFailure {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message)))
}

fn provider_unconfigured() -> ApiFailure {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorBody::new("generation service not configured")),
    )
}

fn processing_error(detail: &str) -> ApiFailure {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::with_detail(GENERIC_ERROR, detail)),
    )
}

fn relay_detail(err: &RelayError) -> String {
    match err {
        RelayError::Upload(e) => format!("upload: {e}"),
        RelayError::Generate(e) => format!("generate: {e}"),
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
