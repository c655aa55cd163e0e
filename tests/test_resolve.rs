//! Tests for resolving request paths under a root directory

use std::fs;
use std::path::Path;

use http_mini_server::files::{resolve, DirEntry, Resolution, Root};
use tempfile::TempDir;

/// Layout:
///
/// ```text
/// outer/
///   secret.txt
///   site/            <- root
///     b.txt
///     a.html
///     Zeta/
///     docs/
///       guide.md
///     with-index/
///       index.html
///     empty/
/// ```
struct Fixture {
    _dir: TempDir,
    outer: std::path::PathBuf,
    root: Root,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let outer = fs::canonicalize(dir.path()).unwrap();
    let site = outer.join("site");

    fs::write(outer.join("secret.txt"), "top secret").unwrap();
    fs::create_dir(&site).unwrap();
    fs::write(site.join("b.txt"), "bee").unwrap();
    fs::write(site.join("a.html"), "<p>a</p>").unwrap();
    fs::create_dir(site.join("Zeta")).unwrap();
    fs::create_dir(site.join("docs")).unwrap();
    fs::write(site.join("docs").join("guide.md"), "# guide").unwrap();
    fs::create_dir(site.join("with-index")).unwrap();
    fs::write(site.join("with-index").join("index.html"), "<h1>hi</h1>").unwrap();
    fs::create_dir(site.join("empty")).unwrap();

    let root = Root::new(&site).unwrap();
    Fixture { _dir: dir, outer, root }
}

fn site(f: &Fixture, rel: &str) -> std::path::PathBuf {
    f.root.as_path().join(rel)
}

#[test]
fn test_root_lists_directories_first_then_names() {
    let f = fixture();

    let Resolution::DirectoryListing { path, entries } = resolve(&f.root, "/") else {
        panic!("expected a listing");
    };

    assert_eq!(path, f.root.as_path());
    assert_eq!(
        entries,
        vec![
            DirEntry::dir("Zeta"),
            DirEntry::dir("docs"),
            DirEntry::dir("empty"),
            DirEntry::dir("with-index"),
            DirEntry::file("a.html"),
            DirEntry::file("b.txt"),
        ]
    );
}

#[test]
fn test_listing_is_idempotent() {
    let f = fixture();

    assert_eq!(resolve(&f.root, "/docs"), resolve(&f.root, "/docs"));
}

#[test]
fn test_directory_with_and_without_trailing_slash() {
    let f = fixture();

    for requested in ["/docs", "/docs/", "/docs//", "/docs///"] {
        let Resolution::DirectoryListing { path, entries } = resolve(&f.root, requested) else {
            panic!("expected a listing for {requested}");
        };
        assert_eq!(path, site(&f, "docs"));
        assert_eq!(entries, vec![DirEntry::file("guide.md")]);
    }
}

#[test]
fn test_empty_directory_lists_nothing() {
    let f = fixture();

    let Resolution::DirectoryListing { entries, .. } = resolve(&f.root, "/empty") else {
        panic!("expected a listing");
    };
    assert!(entries.is_empty());
}

#[test]
fn test_index_html_fallback() {
    let f = fixture();

    let resolution = resolve(&f.root, "/with-index/");

    assert_eq!(
        resolution,
        Resolution::File {
            path: site(&f, "with-index/index.html"),
            size: 11,
            mime: Some("text/html"),
        }
    );
}

#[test]
fn test_root_index_html_fallback() {
    let f = fixture();
    fs::write(site(&f, "index.html"), "<html></html>").unwrap();

    let Resolution::File { path, mime, .. } = resolve(&f.root, "/") else {
        panic!("expected the index file");
    };
    assert_eq!(path, site(&f, "index.html"));
    assert_eq!(mime, Some("text/html"));
}

#[test]
fn test_file_with_size_and_mime() {
    let f = fixture();

    assert_eq!(
        resolve(&f.root, "/b.txt"),
        Resolution::File {
            path: site(&f, "b.txt"),
            size: 3,
            mime: Some("text/plain"),
        }
    );
}

#[test]
fn test_extensionless_text_file_sniffed_as_plain_text() {
    let f = fixture();
    fs::write(site(&f, "LICENSE"), "MIT").unwrap();

    let Resolution::File { mime, size, .. } = resolve(&f.root, "/LICENSE") else {
        panic!("expected a file");
    };
    assert_eq!(mime, Some("text/plain"));
    assert_eq!(size, 3);
}

#[test]
fn test_file_with_unknown_type() {
    let f = fixture();
    fs::write(site(&f, "blob"), [0x7fu8, b'E', b'L', b'F', 0, 0]).unwrap();
    fs::write(site(&f, "empty-file"), "").unwrap();

    for requested in ["/blob", "/empty-file"] {
        let Resolution::File { mime, .. } = resolve(&f.root, requested) else {
            panic!("expected a file for {requested}");
        };
        assert_eq!(mime, None, "{requested}");
    }
}

#[test]
fn test_missing_path_is_not_found() {
    let f = fixture();

    assert_eq!(
        resolve(&f.root, "/nope.txt"),
        Resolution::NotFound { path: site(&f, "nope.txt") }
    );
}

#[test]
fn test_parent_traversal_is_forbidden() {
    let f = fixture();

    for requested in ["/../secret.txt", "/../../etc/passwd", "/docs/../../secret.txt", "/.."] {
        let resolution = resolve(&f.root, requested);
        assert!(
            matches!(resolution, Resolution::Forbidden { .. }),
            "{requested} resolved to {resolution:?}"
        );
    }
}

#[test]
fn test_forbidden_even_when_target_missing() {
    let f = fixture();

    assert_eq!(
        resolve(&f.root, "/../secret"),
        Resolution::Forbidden { path: f.outer.join("secret") }
    );
}

#[test]
fn test_traversal_back_inside_root_is_allowed() {
    let f = fixture();

    assert!(matches!(
        resolve(&f.root, "/docs/../b.txt"),
        Resolution::File { .. }
    ));
    assert!(matches!(
        resolve(&f.root, "/./docs/./guide.md"),
        Resolution::File { .. }
    ));
    assert!(matches!(
        resolve(&f.root, "/../site/b.txt"),
        Resolution::File { .. }
    ));
}

#[test]
fn test_file_with_trailing_slash_still_served() {
    let f = fixture();

    assert!(matches!(resolve(&f.root, "/b.txt/"), Resolution::File { .. }));
}

#[cfg(unix)]
#[test]
fn test_listing_follows_symlinks_and_skips_dangling() {
    let f = fixture();
    std::os::unix::fs::symlink(site(&f, "docs"), site(&f, "empty/link-dir")).unwrap();
    std::os::unix::fs::symlink(site(&f, "b.txt"), site(&f, "empty/link-file")).unwrap();
    std::os::unix::fs::symlink(site(&f, "gone"), site(&f, "empty/dangling")).unwrap();

    let Resolution::DirectoryListing { entries, .. } = resolve(&f.root, "/empty") else {
        panic!("expected a listing");
    };
    assert_eq!(
        entries,
        vec![DirEntry::dir("link-dir"), DirEntry::file("link-file")]
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_to_outside_root_is_served() {
    let f = fixture();
    std::os::unix::fs::symlink(f.outer.join("secret.txt"), site(&f, "alias.txt")).unwrap();
    std::os::unix::fs::symlink(&f.outer, site(&f, "up")).unwrap();

    // Containment is lexical, so links are judged by where they sit, not where they point.
    assert_eq!(
        resolve(&f.root, "/alias.txt"),
        Resolution::File {
            path: site(&f, "alias.txt"),
            size: 10,
            mime: Some("text/plain"),
        }
    );

    let Resolution::DirectoryListing { path, entries } = resolve(&f.root, "/up") else {
        panic!("expected a listing through the link");
    };
    assert_eq!(path, site(&f, "up"));
    assert_eq!(entries, vec![DirEntry::dir("site"), DirEntry::file("secret.txt")]);
}

#[test]
fn test_relative_strips_root_prefix() {
    let f = fixture();

    assert_eq!(f.root.relative(&site(&f, "docs")), "/docs");
    assert_eq!(f.root.relative(f.root.as_path()), "");
    assert!(f.root.contains(&site(&f, "docs")));
    assert!(!f.root.contains(Path::new("/")));
}
