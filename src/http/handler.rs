use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::files::{resolve, DirEntry, Resolution, Root};
use crate::http::mime;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

pub const FORBIDDEN_BODY: &str = "<b>Access forbidden!</b>";
pub const NOT_FOUND_BODY: &str = "<b>Path doesn't exist!</b>";

/// Turns request paths into responses for one served root.
///
/// Cheap to clone; every connection gets its own copy.
#[derive(Debug, Clone)]
pub struct Handler {
    root: Root,
    server_name: Arc<str>,
}

impl Handler {
    pub fn new(root: Root, server_name: impl Into<Arc<str>>) -> Self {
        Self {
            root,
            server_name: server_name.into(),
        }
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Resolves `requested` and renders the matching response.
    ///
    /// `requested` must be non-empty. Filesystem failures become 404s; the only
    /// error is a panicked resolver task.
    pub async fn handle(&self, requested: &str) -> anyhow::Result<Response> {
        let root = self.root.clone();
        let target = requested.to_owned();
        let resolution = tokio::task::spawn_blocking(move || resolve(&root, &target))
            .await
            .context("path resolution task failed")?;

        Ok(self.respond(resolution).await)
    }

    async fn respond(&self, resolution: Resolution) -> Response {
        match resolution {
            Resolution::Forbidden { path } => {
                warn!(path = %path.display(), "Access forbidden");
                self.error(StatusCode::Forbidden, FORBIDDEN_BODY)
            }

            Resolution::DirectoryListing { path, entries } => {
                info!(path = %path.display(), entries = entries.len(), "Serve directory");
                let body = render_listing(&path, self.root.relative(&path), &entries);
                self.base(StatusCode::Ok)
                    .header("Content-Length", body.len().to_string())
                    .header("Content-Type", mime::content_type("text/html"))
                    .body(body.into_bytes())
                    .build()
            }

            Resolution::File { path, size, mime: mime_type } => match tokio::fs::read(&path).await {
                Ok(body) => {
                    info!(path = %path.display(), size, "Serve file");
                    let mut builder = self
                        .base(StatusCode::Ok)
                        .header("Content-Length", body.len().to_string());
                    if let Some(mime_type) = mime_type {
                        builder = builder.header("Content-Type", mime::content_type(mime_type));
                    }
                    builder.body(body).build()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "File vanished or unreadable");
                    self.error(StatusCode::NotFound, NOT_FOUND_BODY)
                }
            },

            Resolution::NotFound { path } => {
                warn!(path = %path.display(), "Path doesn't exist");
                self.error(StatusCode::NotFound, NOT_FOUND_BODY)
            }
        }
    }

    fn base(&self, status: StatusCode) -> ResponseBuilder {
        ResponseBuilder::new(status)
            .header("Server", &*self.server_name)
            .header("Connection", "Keep-Alive")
    }

    fn error(&self, status: StatusCode, body: &str) -> Response {
        self.base(status).body(body.as_bytes().to_vec()).build()
    }
}

/// HTML fragment for a directory: the absolute path in bold, then one link per
/// entry. `relative` is the directory's path below the root (`""` for the root
/// itself); each link is `relative` with the entry name appended directly.
pub fn render_listing(path: &Path, relative: &str, entries: &[DirEntry]) -> String {
    let mut html = format!("<b>{}</b>", path.display());
    if entries.is_empty() {
        return html;
    }

    html.push_str("<ul>");
    for entry in entries {
        html.push_str(&format!(
            "<li><a href='{relative}{name}'>{name}</a></li>",
            name = entry.name
        ));
    }
    html.push_str("</ul>");

    html
}
