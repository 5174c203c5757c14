//! Room phase state machine and match limits.

use std::fmt;

/// A room never seats more than two players.
pub const MAX_PLAYERS: usize = 2;

/// A round ends after this many guesses without a win.
pub const MAX_GUESSES: usize = 6;

/// The lifecycle phase of a room.
///
/// ```text
/// WaitingForOpponent → AwaitingWord → Guessing → RoundOver
///                           ▲            │           │
///                           │            │ (set word │ (set word,
///                           │            │  again)   │  roles swapped)
///                           │            ▼           ▼
///                           └──────── Guessing ◄─────┘
///
/// any phase ──(player leaves)──► Closed (terminal)
/// ```
///
/// - **WaitingForOpponent**: one seat filled, join code outstanding.
/// - **AwaitingWord**: both seats filled, no secret yet; the announced
///   turn-holder is expected to set the word.
/// - **Guessing**: a secret is set; guesses are scored against it.
/// - **RoundOver**: the round ended by a win or by running out of
///   guesses; the next set-word starts a fresh round.
/// - **Closed**: a player left. Terminal — the room ignores game actions
///   and rejects joins until its last player leaves and it is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    WaitingForOpponent,
    AwaitingWord,
    Guessing,
    RoundOver,
    Closed,
}

impl RoomPhase {
    /// Returns `true` if the room is accepting a second player.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::WaitingForOpponent)
    }

    /// Returns `true` if a set-word action may start (or restart) a round.
    pub fn accepts_word(&self) -> bool {
        matches!(self, Self::AwaitingWord | Self::Guessing | Self::RoundOver)
    }

    /// Returns `true` if guesses are currently scored.
    pub fn accepts_guesses(&self) -> bool {
        matches!(self, Self::Guessing)
    }
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WaitingForOpponent => write!(f, "WaitingForOpponent"),
            Self::AwaitingWord => write!(f, "AwaitingWord"),
            Self::Guessing => write!(f, "Guessing"),
            Self::RoundOver => write!(f, "RoundOver"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}
