//! Unified error type for the WordDuel server.

use wordduel_protocol::ProtocolError;
use wordduel_room::RoomError;
use wordduel_transport::TransportError;
use wordduel_words::WordsError;

/// Top-level error that wraps all crate-specific errors.
///
/// Embedders of the `wordduel` crate deal with this single type; the
/// `#[from]` impls let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WordDuelError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (full, closed, not found).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A word-list error (unreadable, malformed, empty).
    #[error(transparent)]
    Words(#[from] WordsError),
}
