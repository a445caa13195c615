//! Server communication.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two REST calls, matching the composer's transport choice: JSON for
//! text-only sends, multipart form data when attachments ride along.

pub mod api;
