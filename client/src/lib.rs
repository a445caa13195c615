//! Browser client for the multimodal chat relay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled to WASM and mounted over the static page the server ships.
//! All state lives client-side; the server is stateless per request, so
//! clearing the conversation is purely a local operation.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and mount the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
