//! Core protocol types for WordDuel's wire format.
//!
//! Everything here is serialized to JSON and crosses the network, so the
//! serde attributes are part of the contract: message enums are internally
//! tagged on `"type"`, and both tags and field names are camelCase to match
//! the client SDK.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Every word in a match — secret or guess — has exactly this many letters.
pub const WORD_LENGTH: usize = 5;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// A player's identity *is* their connection: the transport assigns each
/// accepted connection a fresh id and the server derives the `PlayerId`
/// from it. When the connection goes away, so does the player.
///
/// `#[serde(transparent)]` makes `PlayerId(42)` serialize as plain `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A room's short join code: six uppercase alphanumeric characters.
///
/// The code doubles as the broadcast-group key for the room, so it must be
/// unique among live rooms (the registry collision-checks at generation
/// time). Serialized as the plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Creates a `RoomId` from any string-like code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Game data carried on the wire
// ---------------------------------------------------------------------------

/// One seat in a room: the connection plus a display name assigned by
/// seat order ("Player 1", "Player 2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// The connection this seat belongs to.
    pub id: PlayerId,
    /// Seat-order display name; not an account name.
    pub name: String,
}

/// Per-letter classification of a guess against the secret.
///
/// Serialized lowercase (`"green"`, `"yellow"`, `"gray"`) — these strings
/// are what clients colour their tiles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterFeedback {
    /// Right letter, right position.
    Green,
    /// Letter occurs elsewhere in the secret.
    Yellow,
    /// Letter absent from the secret.
    Gray,
}

/// A scored guess. Immutable once appended to a room's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The guessed word, stored uppercase for display.
    pub text: String,
    /// One entry per letter, in position order.
    pub feedback: [LetterFeedback; WORD_LENGTH],
}

/// The room state sent to both players when a match starts.
///
/// The secret word is deliberately absent — it never travels; clients only
/// ever learn it through `roundOver`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// The room's join code.
    pub id: RoomId,
    /// Seats in join order.
    pub players: Vec<Player>,
    /// Guess history of the current round.
    pub guesses: Vec<GuessRecord>,
}

// ---------------------------------------------------------------------------
// Recipient — who should receive a message?
// ---------------------------------------------------------------------------

/// Routing for an outbound message produced by room logic.
///
/// Game rules return `(Recipient, ServerMessage)` pairs; the room actor
/// fans them out. Never serialized — routing stays inside the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every player currently in the room.
    All,
    /// One specific player (private rejections).
    Player(PlayerId),
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Messages a client sends to the server.
///
/// Internally tagged: `{ "type": "joinRoom", "roomId": "AB12CD" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Request a new room with the sender as its first player.
    CreateRoom,

    /// Join an existing room by its code.
    JoinRoom { room_id: RoomId },

    /// Set the secret word for a new round.
    SetWord { word: String },

    /// Submit a guess against the current secret.
    MakeGuess { guess: String },

    /// Leave the current room without closing the connection.
    LeaveRoom,
}

/// Messages the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// First message on every connection: the id the server will use for
    /// this player in all turn announcements.
    Connected { player_id: PlayerId },

    /// The room requested via `createRoom` exists; share the code to
    /// invite an opponent.
    RoomCreated { room_id: RoomId },

    /// Both seats are filled; sent to both players.
    GameStart { room: RoomSnapshot },

    /// Who sets the first word (drawn uniformly between the two players).
    SetInitialTurn { first_player_id: PlayerId },

    /// A secret has been set; `turn` is the player now guessing.
    NewRound { turn: PlayerId },

    /// Private: the submitted guess is not in the word list.
    InvalidGuess { message: String },

    /// Broadcast after each accepted guess: the full history so far.
    GuessResult { guesses: Vec<GuessRecord> },

    /// The round ended — by a correct guess or by running out of them.
    /// `next_turn` is the player who sets the next word (roles swap).
    RoundOver {
        is_winner: bool,
        secret_word: String,
        next_turn: PlayerId,
    },

    /// The opponent disconnected or left.
    PlayerLeft { message: String },

    /// Private rejection (unknown room, room full, invalid word, ...).
    Error { message: String },
}

// =========================================================================
// Tests
// =========================================================================
