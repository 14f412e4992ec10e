//! # Camelot
//!
//! Lobby and role-reveal server for a social deduction party game.
//!
//! Players create rooms, share a six-digit code, pick characters, and —
//! once the host starts the game — each fetches the slice of the roster
//! their secret role entitles them to see. The server is a single
//! in-memory process: no persistence, no push; clients poll.
//!
//! This crate ties the layers together:
//!
//! ```text
//! net (WebSocket) → handler → LobbyService ─┬─▶ camelot-lobby (registry)
//!                                           └─▶ camelot-rules (reveals)
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use camelot::CamelotServerBuilder;
//!
//! # async fn run() -> Result<(), camelot::CamelotError> {
//! let server = CamelotServerBuilder::new().bind("0.0.0.0:8080").build().await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod net;
mod server;
mod service;

pub use error::CamelotError;
pub use net::{ClientConn, ConnId, Listener, NetError};
pub use server::{CamelotServer, CamelotServerBuilder};
pub use service::{LobbyService, ServiceError};
