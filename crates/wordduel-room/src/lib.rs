//! Room lifecycle and game rules for WordDuel.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! two-player match: the seats, the secret word, and the guess history.
//! All mutations of a room flow through its command channel, so two
//! concurrent actions on the same room can never interleave, and a state
//! change is dispatched to the players in the same step that produced it.
//!
//! # Key types
//!
//! - [`Game`] — the pure turn/round state machine for one match
//! - [`evaluate`] — the per-letter guess scorer
//! - [`RoomRegistry`] — creates/destroys rooms, routes connections
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomPhase`] — lifecycle state of a room

mod error;
mod feedback;
mod game;
mod registry;
mod room;
mod state;

pub use error::RoomError;
pub use feedback::evaluate;
pub use game::Game;
pub use registry::RoomRegistry;
pub use room::{PlayerSender, RoomHandle};
pub use state::{MAX_GUESSES, MAX_PLAYERS, RoomPhase};
