//! Per-connection handler: a strict request/response loop.
//!
//! No handshake and no session — every request names the player it acts
//! for, and the trust model is host-identity-by-id. The handler just
//! shuttles frames:
//!
//! ```text
//! recv → decode Request → lock service → dispatch → encode → send
//! ```

use std::sync::Arc;
use std::time::Duration;

use camelot_protocol::{Codec, Request, Response};

use crate::net::ClientConn;
use crate::server::ServerState;
use crate::CamelotError;

/// Connections silent for this long are dropped. Polling clients check
/// in every couple of seconds, so this is generous.
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    mut conn: ClientConn,
    state: Arc<ServerState>,
) -> Result<(), CamelotError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    loop {
        let data = match tokio::time::timeout(IDLE_TIMEOUT, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
            Err(_) => {
                tracing::debug!(%conn_id, "connection idle, closing");
                break;
            }
        };

        let request: Request = match state.codec.decode(&data) {
            Ok(request) => request,
            Err(e) => {
                // Strict request/response: a malformed frame still gets
                // an answer so the client is not left waiting.
                tracing::debug!(%conn_id, error = %e, "undecodable request");
                let response = Response::Error {
                    code: 400,
                    message: format!("invalid request: {e}"),
                };
                let bytes = state.codec.encode(&response)?;
                conn.send(&bytes).await?;
                continue;
            }
        };

        // Lock only for the dispatch, never across network I/O.
        let response = {
            let mut service = state.service.lock().await;
            service.dispatch(request)
        };

        let bytes = state.codec.encode(&response)?;
        conn.send(&bytes).await?;
    }

    Ok(())
}
