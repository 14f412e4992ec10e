//! `CamelotServer` builder and accept loop.

use std::sync::Arc;

use camelot_lobby::LobbyConfig;
use camelot_protocol::JsonCodec;
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::net::Listener;
use crate::service::LobbyService;
use crate::CamelotError;

/// Shared server state passed to each connection handler task.
///
/// The single service mutex is the concurrency model: every request
/// takes it for the duration of its dispatch, so all lobby operations
/// are serialized and atomic to observers.
pub(crate) struct ServerState {
    pub(crate) service: Mutex<LobbyService>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Camelot server.
///
/// # Example
///
/// ```rust,no_run
/// use camelot::CamelotServerBuilder;
///
/// # async fn run() -> Result<(), camelot::CamelotError> {
/// let server = CamelotServerBuilder::new()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct CamelotServerBuilder {
    bind_addr: String,
    lobby_config: LobbyConfig,
}

impl CamelotServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            lobby_config: LobbyConfig::default(),
        }
    }

    /// Sets the address to listen on.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Overrides the lobby configuration (code length, stale threshold).
    pub fn lobby_config(mut self, config: LobbyConfig) -> Self {
        self.lobby_config = config;
        self
    }

    /// Binds the listener and assembles the server.
    pub async fn build(self) -> Result<CamelotServer, CamelotError> {
        let listener = Listener::bind(&self.bind_addr).await?;
        let state = Arc::new(ServerState {
            service: Mutex::new(LobbyService::new(self.lobby_config)),
            codec: JsonCodec,
        });
        Ok(CamelotServer { listener, state })
    }
}

impl Default for CamelotServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Camelot lobby server.
pub struct CamelotServer {
    listener: Listener,
    state: Arc<ServerState>,
}

impl CamelotServer {
    pub fn builder() -> CamelotServerBuilder {
        CamelotServerBuilder::new()
    }

    /// The bound address (useful with port 0 in tests).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop, spawning one handler task per connection.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), CamelotError> {
        tracing::info!("camelot server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
