//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api`, the health probe, and (when a built
//! client bundle is present) static file serving with an SPA fallback to
//! `index.html`. CORS is wide open; there is no authentication surface.

pub mod chat;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Upper bound for inbound request bodies. Multimodal requests carry up to
/// ten raw files, so this is deliberately generous.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(chat::health))
        .route("/api/chat", post(chat::text_chat))
        .route("/api/chat-multimodal", post(chat::multimodal_chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the pre-built client bundle when it exists; unknown paths fall
    // back to index.html so client-side routing works after a reload.
    let dist = client_dist_dir();
    if dist.is_dir() {
        let spa = ServeDir::new(&dist)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(dist.join("index.html")));
        router = router.fallback_service(spa);
    }

    router
}

/// Resolve the client bundle directory (`CLIENT_DIST_DIR`, default
/// `client/dist` relative to the working directory).
fn client_dist_dir() -> PathBuf {
    std::env::var("CLIENT_DIST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("client/dist"))
}
