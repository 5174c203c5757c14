//! Wire protocol for WordDuel.
//!
//! This crate defines the messages that clients and the server exchange:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`GuessRecord`],
//!   identity newtypes) — the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to and from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding or
//!   decoding.
//!
//! The protocol layer sits between transport (raw frames) and the room
//! layer (game rules). It knows nothing about connections or rooms — only
//! about message shapes.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientMessage, GuessRecord, LetterFeedback, Player, PlayerId, Recipient,
    RoomId, RoomSnapshot, ServerMessage, WORD_LENGTH,
};
