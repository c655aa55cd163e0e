//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 to answer `GET` requests for static files.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection buffering and the read/serve/write cycle
//! - **`parser`**: finds the header block and pulls out the `GET` target
//! - **`request`**: the decoded request path
//! - **`handler`**: turns a path into a response (file, listing or error page)
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection Cycle
//!
//! ```text
//!        ┌─────────────┐
//!        │  Buffering  │ ← Append bytes until "\r\n\r\n"
//!        └──────┬──────┘
//!               │ Header block complete
//!               ▼
//!        ┌──────────────────┐
//!        │   Extracting     │ ← "GET <path> " → percent-decoded path
//!        └──────┬───────────┘
//!               ├─ No GET target → Buffering (nothing is sent)
//!               ▼
//!        ┌──────────────────┐
//!        │    Serving       │ ← Resolve under root, write response
//!        └──────┬───────────┘
//!               └─ Buffering (same connection, until the peer closes)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use http_mini_server::files::Root;
//! use http_mini_server::http::{connection::Connection, handler::Handler};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = Handler::new(Root::new("/srv/www")?, "HttpMiniServer");
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, handler.clone());
//!         tokio::spawn(conn.run());
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
