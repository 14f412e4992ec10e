//! Room and player registry for Camelot.
//!
//! This crate owns all mutable lobby state: room records, player
//! records, identity allocation, and every lifecycle transition
//! (create, join, configure, select, start, reset, back-to-lobby,
//! kick, leave, heartbeat, stale eviction).
//!
//! # Concurrency note
//!
//! [`LobbyRegistry`] is NOT thread-safe by itself — plain `HashMap`s,
//! no interior locking. This is intentional: the server wraps the whole
//! registry in a single async mutex and takes it once per request, which
//! makes every operation atomic to observers (the per-room
//! serializability the service needs) without hidden locking here.
//!
//! # How it fits in the stack
//!
//! ```text
//! Service layer (above)  ← dispatches requests, runs roster validation
//!     ↕
//! Registry (this crate)  ← owns rooms/players, enforces lifecycle rules
//!     ↕
//! Rules crate (below)    ← pure character/reveal computations
//! ```

mod config;
mod error;
mod player;
mod registry;
mod room;

pub use config::LobbyConfig;
pub use error::LobbyError;
pub use player::Player;
pub use registry::LobbyRegistry;
pub use room::Room;
