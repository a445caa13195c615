//! Request-scoped orchestration services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `staging` owns the temporary on-disk lifecycle of inbound files;
//! `relay` runs the upload-then-generate pipeline against the provider.

pub mod relay;
pub mod staging;
