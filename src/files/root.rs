use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

/// The directory every request is confined to.
///
/// Stored canonicalized (absolute, no `.`/`..`, symlinks resolved) and shared
/// between connections by reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    path: Arc<Path>,
}

impl Root {
    /// Canonicalizes `path` and checks that it names a directory.
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path)
            .with_context(|| format!("Root directory doesn't exist: {}", path.display()))?;

        if !canonical.is_dir() {
            anyhow::bail!("Root directory doesn't exist: {}", path.display());
        }

        Ok(Self {
            path: canonical.into(),
        })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Appends the request path to the root as plain text, so `"/a"` under
    /// `/srv` becomes `/srv/a` and `"a"` becomes `/srva`.
    pub fn join_request(&self, requested: &str) -> PathBuf {
        let mut joined = OsString::from(self.path.as_os_str());
        joined.push(requested);
        PathBuf::from(joined)
    }

    /// String-prefix containment on an already normalized path.
    pub fn contains(&self, normalized: &Path) -> bool {
        normalized
            .as_os_str()
            .as_encoded_bytes()
            .starts_with(self.path.as_os_str().as_encoded_bytes())
    }

    /// Strips the root prefix, leaving the request-relative form of `path`.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a str {
        let root = self.path.as_os_str().as_encoded_bytes();
        path.to_str()
            .and_then(|p| p.get(root.len()..))
            .unwrap_or("")
    }
}

/// Lexically resolves `.` and `..` and drops redundant separators.
///
/// `..` never climbs above the filesystem root. Symlinks are left untouched.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    out
}
