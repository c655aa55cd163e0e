use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::http::handler::Handler;
use crate::http::parser::{find_headers_end, parse_request_head, scanned_up_to};
use crate::http::writer::ResponseWriter;

const READ_CHUNK: usize = 4096;

/// One client connection: its read buffer, last request path and socket.
///
/// Owned by the task serving the connection and dropped with it.
pub struct Connection<S> {
    stream: S,
    handler: Handler,
    buffer: BytesMut,
    /// Prefix of `buffer` already searched for the header terminator.
    scanned: usize,
    requested_path: String,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Handler) -> Self {
        Self {
            stream,
            handler,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            scanned: 0,
            requested_path: String::new(),
        }
    }

    /// Feeds the socket into [`Self::on_bytes_received`] until the peer hangs up.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut temp = [0u8; READ_CHUNK];

        loop {
            let n = self.stream.read(&mut temp).await?;

            if n == 0 {
                // Client closed connection
                self.on_closed();
                return Ok(());
            }

            self.on_bytes_received(&temp[..n]).await?;
        }
    }

    /// Buffers `chunk` and, once a full header block is present, answers it.
    ///
    /// Only one header block is handled per call. Bytes following it stay
    /// buffered until the next chunk arrives.
    pub async fn on_bytes_received(&mut self, chunk: &[u8]) -> anyhow::Result<()> {
        self.buffer.extend_from_slice(chunk);

        if find_headers_end(&self.buffer, self.scanned).is_none() {
            self.scanned = scanned_up_to(self.buffer.len());
            return Ok(());
        }

        let Some((request, consumed)) = parse_request_head(&self.buffer) else {
            return Ok(());
        };

        self.buffer.advance(consumed);
        self.scanned = 0;
        self.requested_path = request.path;

        self.serve().await
    }

    /// Drops the session, including anything still buffered.
    pub fn on_closed(self) {
        tracing::info!(buffered = self.buffer.len(), "Client disconnected");
    }

    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    pub fn requested_path(&self) -> &str {
        &self.requested_path
    }

    async fn serve(&mut self) -> anyhow::Result<()> {
        if self.requested_path.is_empty() {
            tracing::debug!("Header block without GET target, not answering");
            return Ok(());
        }

        let response = self.handler.handle(&self.requested_path).await?;
        ResponseWriter::new(&response)
            .write_to_stream(&mut self.stream)
            .await
    }
}
