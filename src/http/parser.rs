use crate::http::request::Request;

const HEADERS_END: &[u8] = b"\r\n\r\n";
const GET_TOKEN: &[u8] = b"GET ";

/// Extracts the request from the first complete header block in `buf`.
///
/// Returns `None` until `\r\n\r\n` has arrived. Otherwise returns the request
/// and the number of bytes consumed, which covers the terminator. A block
/// without a `GET ` token yields an empty [`Request`].
pub fn parse_request_head(buf: &[u8]) -> Option<(Request, usize)> {
    let headers_end = find_headers_end(buf, 0)?;
    let head = &buf[..headers_end];

    let request = match find(head, GET_TOKEN) {
        Some(get) => {
            let target = &head[get + GET_TOKEN.len()..];
            // No space before the terminator: the target runs to the end of the block.
            let len = target.iter().position(|&b| b == b' ').unwrap_or(target.len());
            Request::from_target(&target[..len])
        }
        None => Request::empty(),
    };

    Some((request, headers_end + HEADERS_END.len()))
}

/// Position of the first `\r\n\r\n` starting at or after `from`.
pub fn find_headers_end(buf: &[u8], from: usize) -> Option<usize> {
    let from = from.min(buf.len());
    find(&buf[from..], HEADERS_END).map(|pos| from + pos)
}

/// How far a buffer of `len` bytes without a terminator is known clean; a
/// terminator may still straddle the last three bytes.
pub fn scanned_up_to(len: usize) -> usize {
    len.saturating_sub(HEADERS_END.len() - 1)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
}
