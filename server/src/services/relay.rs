//! Relay service — the upload-then-generate pipeline.
//!
//! DESIGN
//! ======
//! One call per multimodal request: staged files are uploaded to the
//! provider strictly one after another so the assembled content payload
//! preserves arrival order, then a single generation call runs over all
//! file references followed by the trimmed prompt. Any upload or
//! generation failure aborts the pipeline; there are no partial results.
//! Temp-file cleanup stays with the caller, which owns the staging
//! lifecycle.

use std::sync::Arc;

use tracing::info;

use crate::genai::{GenAi, GenAiError, Part, UploadedFile};
use crate::services::staging::StagedFile;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("file upload failed: {0}")]
    Upload(#[source] GenAiError),
    #[error("generation failed: {0}")]
    Generate(#[source] GenAiError),
}

/// Result of a successful multimodal relay.
#[derive(Debug)]
pub struct RelayOutcome {
    pub text: String,
    /// Provider references for every uploaded file, in upload order.
    pub files: Vec<UploadedFile>,
}

/// Upload every staged file sequentially, then run one generation call
/// over the combined content payload.
///
/// # Errors
///
/// Returns [`RelayError::Upload`] if any upload fails (remaining files are
/// not attempted) and [`RelayError::Generate`] if the generation call
/// fails.
pub async fn run_multimodal(
    genai: &Arc<dyn GenAi>,
    prompt: &str,
    staged: &[StagedFile],
) -> Result<RelayOutcome, RelayError> {
    let mut uploaded = Vec::with_capacity(staged.len());
    for file in staged {
        let reference = genai
            .upload_file(&file.path, &file.mime_type, &file.display_name)
            .await
            .map_err(RelayError::Upload)?;
        uploaded.push(reference);
    }
    info!(files = uploaded.len(), "relay: files staged with provider");

    let parts = build_parts(&uploaded, prompt);
    let reply = genai.generate(&parts, None).await.map_err(RelayError::Generate)?;

    Ok(RelayOutcome { text: reply.text, files: uploaded })
}

/// Assemble the ordered content payload: every file reference first, in
/// upload order, then the trimmed prompt when non-empty. The ordering is a
/// fixed contract, not configurable.
#[must_use]
pub fn build_parts(uploaded: &[UploadedFile], prompt: &str) -> Vec<Part> {
    let mut parts: Vec<Part> = uploaded
        .iter()
        .map(|f| Part::FileData { uri: f.uri.clone(), mime_type: f.mime_type.clone() })
        .collect();

    let trimmed = prompt.trim();
    if !trimmed.is_empty() {
        parts.push(Part::Text(trimmed.to_owned()));
    }
    parts
}

#[cfg(test)]
#[path = "relay_test.rs"]
mod tests;
