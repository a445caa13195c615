//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! server is stateless per request: no sessions, no conversation history.
//! The only shared pieces are the provider handle (configured once at
//! startup), the model identifier for `/health`, and the staging directory
//! for inbound uploads.

use std::path::PathBuf;
use std::sync::Arc;

use crate::genai::GenAi;

/// Shared application state. Clone is required by Axum; all fields are
/// cheap to clone or Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Provider client. `None` when no API key is configured; generation
    /// endpoints then return an error body while `/health` keeps working.
    pub genai: Option<Arc<dyn GenAi>>,
    /// Configured model identifier, reported by `/health`.
    pub model: String,
    /// Directory for temporary upload staging.
    pub upload_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(genai: Option<Arc<dyn GenAi>>, model: String, upload_dir: PathBuf) -> Self {
        Self { genai, model, upload_dir }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
