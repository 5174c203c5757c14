//! Error types for the room layer.

use wordduel_protocol::{PlayerId, RoomId};

/// Errors that can occur during room operations.
///
/// None of these are fatal: join failures are reported privately to the
/// requesting connection, and the rest mark benign races (an action
/// arriving for a room that just went away) that callers treat as no-ops.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No live room has this code.
    #[error("room {0} does not exist")]
    NotFound(RoomId),

    /// Both seats are already taken.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The room lost a player and no longer accepts joins.
    #[error("room {0} is closed")]
    Closed(RoomId),

    /// The connection is already seated in a room.
    #[error("player {0} is already in room {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    /// The connection is not in any room.
    #[error("player {0} is not in any room")]
    NoActiveRoom(PlayerId),

    /// The room's command channel is gone — its actor already stopped.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}
