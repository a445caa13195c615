//! File capture: picker filter, drag/drop and paste extraction, and
//! reading browser `File`s into pending attachments.
//!
//! Client-side (hydrate): real `web-sys` calls. Server-side: stubs, since
//! files only ever arrive in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use crate::state::chat::PendingAttachment;

/// MIME filter for the file picker: images, audio, video, PDF, plain
/// text, Word and Excel documents. Advisory only; nothing re-validates
/// the selection.
pub const FILE_ACCEPT: &str = "image/*,audio/*,video/*,application/pdf,text/plain,application/vnd.openxmlformats-officedocument.wordprocessingml.document,application/msword,application/vnd.ms-excel,application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[cfg(any(test, feature = "hydrate"))]
fn mime_or_fallback(raw: &str) -> String {
    if raw.is_empty() { "application/octet-stream".to_owned() } else { raw.to_owned() }
}

/// Read one browser file into a pending attachment, minting an object URL
/// for the inline preview. Returns `None` if the file cannot be read.
#[cfg(feature = "hydrate")]
pub async fn pending_from_file(file: &web_sys::File) -> Option<PendingAttachment> {
    use wasm_bindgen_futures::JsFuture;

    let buffer = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let preview_uri = web_sys::Url::create_object_url_with_blob(file).ok();
    Some(PendingAttachment {
        name: file.name(),
        mime_type: mime_or_fallback(&file.type_()),
        size: bytes.len() as u64,
        bytes,
        preview_uri,
    })
}

/// Read every file in a `FileList`, preserving order. Unreadable entries
/// are skipped.
#[cfg(feature = "hydrate")]
pub async fn pending_from_file_list(list: &web_sys::FileList) -> Vec<PendingAttachment> {
    let mut out = Vec::new();
    for index in 0..list.length() {
        if let Some(file) = list.get(index) {
            if let Some(attachment) = pending_from_file(&file).await {
                out.push(attachment);
            }
        }
    }
    out
}

/// Extract dropped files from a drag event.
#[cfg(feature = "hydrate")]
pub async fn pending_from_drop(event: &web_sys::DragEvent) -> Vec<PendingAttachment> {
    match event.data_transfer().and_then(|dt| dt.files()) {
        Some(list) => pending_from_file_list(&list).await,
        None => Vec::new(),
    }
}

/// Extract pasted files (screenshots, copied images) from a clipboard
/// event.
#[cfg(feature = "hydrate")]
pub async fn pending_from_paste(event: &web_sys::ClipboardEvent) -> Vec<PendingAttachment> {
    match event.clipboard_data().and_then(|dt| dt.files()) {
        Some(list) => pending_from_file_list(&list).await,
        None => Vec::new(),
    }
}

/// Release an attachment's preview object URL, if it has one.
pub fn revoke_preview(attachment: &PendingAttachment) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(uri) = &attachment.preview_uri {
            let _ = web_sys::Url::revoke_object_url(uri);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = attachment;
    }
}

/// Release preview URLs for a batch of attachments (send consumption,
/// chat clearing).
pub fn revoke_previews(attachments: &[PendingAttachment]) {
    for attachment in attachments {
        revoke_preview(attachment);
    }
}
