//! WebSocket plumbing: a TCP listener that upgrades connections and a
//! thin wrapper that speaks in byte frames.
//!
//! There is exactly one transport, so these are concrete types rather
//! than a trait layer. Each handler task owns its connection mutably —
//! no sharing, no interior locking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

/// Counter for generating unique connection ids.
static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

type WsStream = tokio_tungstenite::WebSocketStream<TcpStream>;

/// Opaque identifier for a connection, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(u64);

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Errors that can occur at the socket layer.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    /// Binding the listen address failed.
    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),

    /// Accepting a TCP connection failed.
    #[error("accept failed: {0}")]
    Accept(#[source] std::io::Error),

    /// The WebSocket upgrade handshake failed.
    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    Send(#[source] tokio_tungstenite::tungstenite::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    Receive(#[source] tokio_tungstenite::tungstenite::Error),
}

/// Listens for and upgrades incoming WebSocket connections.
pub struct Listener {
    listener: TcpListener,
}

impl Listener {
    /// Binds to the given address.
    pub async fn bind(addr: &str) -> Result<Self, NetError> {
        let listener = TcpListener::bind(addr).await.map_err(NetError::Bind)?;
        tracing::info!(addr, "listening for connections");
        Ok(Self { listener })
    }

    /// The locally bound address (useful with port 0 in tests).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for the next client and completes the WebSocket upgrade.
    pub async fn accept(&mut self) -> Result<ClientConn, NetError> {
        let (stream, peer) = self.listener.accept().await.map_err(NetError::Accept)?;
        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(NetError::Handshake)?;

        let id = ConnId(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed));
        tracing::debug!(%id, %peer, "connection accepted");
        Ok(ClientConn { id, ws })
    }
}

/// A single client connection carrying byte frames.
pub struct ClientConn {
    id: ConnId,
    ws: WsStream,
}

impl ClientConn {
    pub fn id(&self) -> ConnId {
        self.id
    }

    /// Sends one binary frame.
    pub async fn send(&mut self, data: &[u8]) -> Result<(), NetError> {
        use futures_util::SinkExt;
        self.ws
            .send(Message::Binary(data.to_vec().into()))
            .await
            .map_err(NetError::Send)
    }

    /// Receives the next data frame.
    ///
    /// Text frames are passed through as their UTF-8 bytes so browser
    /// clients may send either kind. Returns `Ok(None)` on clean close.
    pub async fn recv(&mut self) -> Result<Option<Vec<u8>>, NetError> {
        use futures_util::StreamExt;
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_bytes().to_vec())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frames
                Some(Err(e)) => return Err(NetError::Receive(e)),
            }
        }
    }
}
