//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! All conversation state is local to the browser tab; the server keeps no
//! session. State types are plain data with explicit transition methods so
//! the send/rollback and recorder logic stays testable off-WASM.

pub mod chat;
pub mod recorder;
