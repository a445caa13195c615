//! Generative-AI provider integration.
//!
//! DESIGN
//! ======
//! `types` defines the provider-neutral [`GenAi`](types::GenAi) trait and
//! content payload model, `config` reads environment configuration, and
//! `gemini` implements the trait over the public REST API. Handlers only
//! ever see an `Arc<dyn GenAi>`, so tests substitute a mock.

pub mod config;
pub mod gemini;
pub mod types;

use std::sync::Arc;

pub use config::model_from_env;
pub use types::{GenAi, GenAiError, GenerateReply, Part, UploadedFile};

/// Build the shared provider handle from environment variables.
///
/// # Errors
///
/// Returns an error when no API key is configured or the HTTP client fails
/// to build. Callers treat this as non-fatal: the server still starts, with
/// generation endpoints disabled.
pub fn client_from_env() -> Result<Arc<dyn GenAi>, GenAiError> {
    let config = config::GenAiConfig::from_env()?;
    let client = gemini::GeminiClient::new(config)?;
    Ok(Arc::new(client))
}
