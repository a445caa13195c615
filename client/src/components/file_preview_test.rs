use super::*;

#[test]
fn kind_follows_mime_family() {
    assert_eq!(preview_kind("image/png"), PreviewKind::Image);
    assert_eq!(preview_kind("audio/webm"), PreviewKind::Audio);
    assert_eq!(preview_kind("video/mp4"), PreviewKind::Video);
}

#[test]
fn documents_fall_back_to_label() {
    assert_eq!(preview_kind("application/pdf"), PreviewKind::Other);
    assert_eq!(preview_kind("text/plain"), PreviewKind::Other);
    assert_eq!(preview_kind("application/octet-stream"), PreviewKind::Other);
}

#[test]
fn empty_mime_is_not_a_media_kind() {
    assert_eq!(preview_kind(""), PreviewKind::Other);
}
