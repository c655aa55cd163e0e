use std::cmp::Ordering;
use std::io;
use std::path::Path;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: false }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: true }
    }
}

impl Ord for DirEntry {
    /// Directories first, then by name.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_dir
            .cmp(&self.is_dir)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for DirEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lists the files and subdirectories directly inside `dir`, sorted.
///
/// Symlinks are followed; dangling links and special files (sockets, fifos,
/// devices) are skipped.
pub fn list_dir(dir: &Path) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;

        let Ok(meta) = std::fs::metadata(entry.path()) else {
            continue;
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if meta.is_dir() {
            entries.push(DirEntry::dir(name));
        } else if meta.is_file() {
            entries.push(DirEntry::file(name));
        }
    }

    entries.sort();
    Ok(entries)
}
