//! Temporary disk staging for inbound multipart files.
//!
//! DESIGN
//! ======
//! Each received file is written under a UUID-generated name so concurrent
//! requests sharing the staging directory never collide. Cleanup is
//! best-effort and unconditional: the handler removes every staged file
//! before responding, success or failure, and deletion errors are logged
//! and swallowed.

use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

/// One file staged on local disk, pending upload to the provider.
#[derive(Clone, Debug)]
pub struct StagedFile {
    /// On-disk location under the staging directory.
    pub path: PathBuf,
    /// MIME type reported by the client, or a guess from the filename.
    pub mime_type: String,
    /// Original upload filename, used as the provider display name.
    pub display_name: String,
}

/// Write one inbound file's bytes to the staging directory.
///
/// The staging directory is created on first use. The stored name is a
/// fresh UUID so the original filename never touches the filesystem.
///
/// # Errors
///
/// Returns an IO error if the directory cannot be created or the bytes
/// cannot be written.
pub async fn stage_bytes(
    dir: &Path,
    display_name: &str,
    mime_type: Option<&str>,
    bytes: &[u8],
) -> std::io::Result<StagedFile> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(Uuid::new_v4().to_string());
    tokio::fs::write(&path, bytes).await?;

    let mime_type = match mime_type {
        Some(m) if !m.trim().is_empty() => m.to_owned(),
        _ => mime_guess::from_path(display_name).first_or_octet_stream().to_string(),
    };

    Ok(StagedFile { path, mime_type, display_name: to_display_name(display_name) })
}

/// Remove every staged file, ignoring individual failures.
pub async fn cleanup(files: &[StagedFile]) {
    for file in files {
        if let Err(e) = tokio::fs::remove_file(&file.path).await {
            debug!(path = %file.path.display(), error = %e, "staged file cleanup failed");
        }
    }
}

/// Normalize a client-supplied filename for display: strip any path
/// components, fall back to a fixed name when empty.
fn to_display_name(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if name.is_empty() { "file".to_owned() } else { name.to_owned() }
}

#[cfg(test)]
#[path = "staging_test.rs"]
mod tests;
