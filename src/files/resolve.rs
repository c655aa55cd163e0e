use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use crate::files::listing::{list_dir, DirEntry};
use crate::files::root::{normalize, Root};
use crate::http::mime;

const INDEX_FILE: &str = "index.html";

/// What a request path resolves to under a [`Root`].
///
/// Every variant carries the normalized path it was decided on, for logging
/// and for rendering listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The normalized path escapes the root.
    Forbidden { path: PathBuf },
    /// A directory inside the root, with its sorted children.
    DirectoryListing { path: PathBuf, entries: Vec<DirEntry> },
    /// A readable regular file inside the root.
    File {
        path: PathBuf,
        size: u64,
        mime: Option<&'static str>,
    },
    /// Missing, unreadable, or not a regular file.
    NotFound { path: PathBuf },
}

/// Resolves a percent-decoded, non-empty request path against `root`.
///
/// Blocking: touches the filesystem. Callers on an async runtime should run it
/// on the blocking pool.
pub fn resolve(root: &Root, requested: &str) -> Resolution {
    let mut requested = requested;
    while requested.ends_with("//") {
        requested = &requested[..requested.len() - 1];
    }

    let mut path = root.join_request(requested);
    if path.is_dir() {
        let index = path.join(INDEX_FILE);
        if index.is_file() {
            path = index;
        }
    }

    let path = normalize(&path);

    // Containment is checked on the normalized path only.
    if !root.contains(&path) {
        return Resolution::Forbidden { path };
    }

    if path.is_dir() {
        return match list_dir(&path) {
            Ok(entries) => Resolution::DirectoryListing { path, entries },
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to list directory");
                Resolution::NotFound { path }
            }
        };
    }

    // Type check before open: opening a fifo would block.
    let is_file = std::fs::metadata(&path)
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Resolution::NotFound { path };
    }

    match File::open(&path).and_then(|f| Ok((f.metadata()?.len(), f))) {
        Ok((size, file)) => {
            let mime_type = mime::guess(&path).or_else(|| sniff_file(file));
            Resolution::File { path, size, mime: mime_type }
        }
        Err(_) => Resolution::NotFound { path },
    }
}

fn sniff_file(file: File) -> Option<&'static str> {
    let mut head = Vec::with_capacity(mime::SNIFF_LEN);
    file.take(mime::SNIFF_LEN as u64).read_to_end(&mut head).ok()?;
    mime::sniff(&head)
}
