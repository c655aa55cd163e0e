//! Filesystem side of request handling.
//!
//! - **`root`**: the served directory and lexical path normalization
//! - **`resolve`**: maps a request path to a [`Resolution`]
//! - **`listing`**: sorted directory listings

pub mod listing;
pub mod resolve;
pub mod root;

pub use listing::DirEntry;
pub use resolve::{resolve, Resolution};
pub use root::Root;
