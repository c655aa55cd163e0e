use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::Handler;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let root = cfg.root()?;
    let addr = cfg.listen_addr();

    let listener = TcpListener::bind(addr).await?;
    info!(
        port = cfg.server.port,
        root = %root.as_path().display(),
        "Server started"
    );

    serve(listener, Handler::new(root, cfg.server.name.as_str())).await
}

/// Accepts connections forever, one task each.
pub async fn serve(listener: TcpListener, handler: Handler) -> anyhow::Result<()> {
    loop {
        if !spawn_connection(listener.accept().await, &handler) {
            // Back off on persistent errors such as EMFILE.
            tokio::time::sleep(ACCEPT_BACKOFF).await;
        }
    }
}

/// Starts a task for one accept result. A failed accept is logged and
/// reported as `false`; it never ends the accept loop.
pub fn spawn_connection<S>(accepted: io::Result<(S, SocketAddr)>, handler: &Handler) -> bool
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (socket, peer) = match accepted {
        Ok(accepted) => accepted,
        Err(e) => {
            tracing::error!("Failed to accept connection: {}", e);
            return false;
        }
    };

    let conn = Connection::new(socket, handler.clone());
    tokio::spawn(
        async move {
            info!("Client connected");
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error: {}", e);
            }
        }
        .instrument(tracing::info_span!("client", %peer)),
    );

    true
}
