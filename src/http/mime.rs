//! MIME type detection based on file extensions.

use std::path::Path;

/// Best-effort MIME type for `path`, or `None` when the extension is unknown.
///
/// The lookup table is static, so this is safe to call from any thread.
pub fn guess(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}

/// How many leading bytes [`sniff`] looks at.
pub const SNIFF_LEN: usize = 512;

/// Content-based fallback for files whose extension says nothing.
///
/// Non-empty UTF-8 without NUL bytes is `text/plain`; anything else is
/// unknown. A multi-byte sequence cut off at the end of `head` still counts
/// as text.
pub fn sniff(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() || head.contains(&0) {
        return None;
    }

    match std::str::from_utf8(head) {
        Ok(_) => Some("text/plain"),
        Err(e) if e.error_len().is_none() => Some("text/plain"),
        Err(_) => None,
    }
}

/// `Content-Type` header value for a known MIME type.
pub fn content_type(mime: &str) -> String {
    format!("{mime}; charset=utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(guess(Path::new("/srv/index.html")), Some("text/html"));
        assert_eq!(guess(Path::new("style.css")), Some("text/css"));
        assert_eq!(guess(Path::new("a/b/photo.png")), Some("image/png"));
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(guess(Path::new("/srv/README")), None);
        assert_eq!(guess(Path::new("blob.notarealext")), None);
    }

    #[test]
    fn sniff_text_and_binary() {
        assert_eq!(sniff(b"MIT License\n\nCopyright"), Some("text/plain"));
        assert_eq!(sniff("caf\u{e9}".as_bytes()), Some("text/plain"));
        // "é" cut after its first byte
        assert_eq!(sniff(&[b'c', b'a', b'f', 0xC3]), Some("text/plain"));
        assert_eq!(sniff(&[0x7f, b'E', b'L', b'F', 0, 1]), None);
        assert_eq!(sniff(&[0xFF, 0xFE, b'a']), None);
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn charset_suffix() {
        assert_eq!(content_type("text/plain"), "text/plain; charset=utf-8");
    }
}
