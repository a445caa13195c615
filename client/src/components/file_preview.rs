//! Inline media preview for a pending attachment.
//!
//! Images, audio and video render from the attachment's object URL; every
//! other MIME type (and anything without a preview URL, such as a finished
//! recording) falls back to a type label.

#[cfg(test)]
#[path = "file_preview_test.rs"]
mod file_preview_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Audio,
    Video,
    Other,
}

#[must_use]
pub fn preview_kind(mime_type: &str) -> PreviewKind {
    if mime_type.starts_with("image/") {
        PreviewKind::Image
    } else if mime_type.starts_with("audio/") {
        PreviewKind::Audio
    } else if mime_type.starts_with("video/") {
        PreviewKind::Video
    } else {
        PreviewKind::Other
    }
}

#[component]
pub fn FilePreview(
    name: String,
    mime_type: String,
    preview_uri: Option<String>,
) -> impl IntoView {
    let media = match (preview_kind(&mime_type), preview_uri) {
        (PreviewKind::Image, Some(uri)) => {
            view! { <img class="chat__preview-media" src=uri alt=name.clone() /> }.into_any()
        }
        (PreviewKind::Audio, Some(uri)) => {
            view! { <audio class="chat__preview-media" controls src=uri></audio> }.into_any()
        }
        (PreviewKind::Video, Some(uri)) => {
            view! { <video class="chat__preview-media" controls src=uri></video> }.into_any()
        }
        _ => view! { <div class="chat__preview-kind">{mime_type}</div> }.into_any(),
    };
    view! {
        <figure class="chat__preview" title=name.clone()>
            {media}
            <figcaption class="chat__preview-name">{name.clone()}</figcaption>
        </figure>
    }
}
