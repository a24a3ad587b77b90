//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use futures::{SinkExt, StreamExt};
use signalmgr_client::SignalClient;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use wiremock::MockServer;

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client pointed at a mock HTTP server.
pub fn client_for(server: &MockServer) -> SignalClient {
    init_tracing();
    SignalClient::builder()
        .base_url(server.uri())
        .build()
        .expect("valid mock server URL")
}

/// A one-shot WebSocket server that plays back a fixed list of frames.
pub struct FeedServer {
    /// Address the server listens on.
    pub addr: SocketAddr,
    /// Receives the request path of the accepted connection.
    pub path: oneshot::Receiver<String>,
    /// Handle to the server task.
    pub handle: JoinHandle<()>,
}

impl FeedServer {
    /// Accept one connection, send `frames`, then close it cleanly.
    pub async fn start(frames: Vec<Message>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind feed server");
        let addr = listener.local_addr().expect("feed server address");
        let (path_tx, path_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let callback =
                |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
                    let _ = path_tx.send(request.uri().path().to_string());
                    Ok(response)
                };
            let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(stream, callback).await else {
                return;
            };

            for frame in frames {
                if ws.send(frame).await.is_err() {
                    return;
                }
            }
            let _ = ws.close(None).await;
            // Drain until the client answers the close handshake
            while let Some(Ok(_)) = ws.next().await {}
        });

        Self {
            addr,
            path: path_rx,
            handle,
        }
    }

    /// Client pointed at this server.
    pub fn client(&self) -> SignalClient {
        init_tracing();
        SignalClient::builder()
            .base_url(format!("http://{}", self.addr))
            .build()
            .expect("valid feed server URL")
    }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    listener.local_addr().expect("probe address")
}
