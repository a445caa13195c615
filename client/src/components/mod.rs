//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render conversation chrome; all state lives in the page and
//! flows in through props and callbacks.

pub mod attachment_chip;
pub mod file_preview;
pub mod message_bubble;
