use percent_encoding::percent_decode;

/// The part of a client request the server acts on.
///
/// Only the target of a `GET` line is kept; every other header is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Percent-decoded request path (e.g. `"/my docs/index.html"`).
    /// Empty when the header block carried no `GET ` token.
    pub path: String,
}

impl Request {
    /// Builds a request from the raw, still percent-encoded target bytes.
    ///
    /// Invalid UTF-8 after decoding is replaced rather than rejected.
    ///
    /// # Example
    ///
    /// ```
    /// # use http_mini_server::http::request::Request;
    /// let req = Request::from_target(b"/a%20b.txt");
    /// assert_eq!(req.path, "/a b.txt");
    /// ```
    pub fn from_target(raw: &[u8]) -> Self {
        Self {
            path: percent_decode(raw).decode_utf8_lossy().into_owned(),
        }
    }

    /// A request with no usable target; the server does not answer these.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_target(&self) -> bool {
        !self.path.is_empty()
    }
}
