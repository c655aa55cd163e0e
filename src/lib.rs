//! HttpMiniServer - static file server
//!
//! Serves one directory over HTTP: files, generated directory listings and
//! error pages, never anything outside the configured root.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
