//! Wire protocol for Camelot.
//!
//! This crate defines the request/response contract the lobby service
//! exposes and how it is serialized:
//!
//! - **Identity** ([`PlayerId`], [`RoomCode`]) — who and where.
//! - **Contract** ([`Request`], [`Response`]) — one variant per service
//!   operation, with [`RoomView`]/[`PlayerView`] as the denormalized
//!   read models clients render.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages become
//!   bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer carries no game or lobby logic. It only knows the
//! shape of the conversation:
//!
//! ```text
//! socket (bytes) → protocol (Request) → service (lobby + rules)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{PlayerId, PlayerView, Request, Response, RoomCode, RoomStatus, RoomView};
