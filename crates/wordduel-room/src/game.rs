//! The turn/round state machine for one two-player match.
//!
//! [`Game`] is pure state plus transitions: it never touches channels,
//! sockets, or locks. Each action returns the messages to deliver, paired
//! with a [`Recipient`]; the room actor owns dispatch. This keeps every
//! rule unit-testable without a runtime.

use rand::Rng;

use wordduel_protocol::{
    GuessRecord, Player, PlayerId, Recipient, RoomId, RoomSnapshot, ServerMessage,
    WORD_LENGTH,
};
use wordduel_words::Dictionary;

use crate::RoomError;
use crate::feedback::evaluate;
use crate::state::{MAX_GUESSES, MAX_PLAYERS, RoomPhase};

/// Messages produced by a game transition, ready for dispatch.
pub type Outbound = Vec<(Recipient, ServerMessage)>;

/// The state of one match: seats, current secret, and guess history.
///
/// Validation failures (a word the dictionary rejects) produce a private
/// message to the sender and change nothing. Actions that only make sense
/// in another phase — a guess before any word is set, a word while the
/// room is still waiting for an opponent — produce nothing at all: they
/// arise from benign races and are dropped silently.
#[derive(Debug)]
pub struct Game {
    room_id: RoomId,
    players: Vec<Player>,
    phase: RoomPhase,
    secret_word: Option<String>,
    guesses: Vec<GuessRecord>,
    word_setter: Option<PlayerId>,
}

impl Game {
    /// Creates a match with the creating connection in seat 1.
    pub fn new(room_id: RoomId, creator: PlayerId) -> Self {
        Self {
            room_id,
            players: vec![Player {
                id: creator,
                name: "Player 1".to_string(),
            }],
            phase: RoomPhase::WaitingForOpponent,
            secret_word: None,
            guesses: Vec::new(),
            word_setter: None,
        }
    }

    /// Seats the second player and starts the match.
    ///
    /// Draws the first word-setter uniformly between the two seats and
    /// announces both the start and the draw to everyone.
    ///
    /// # Errors
    /// [`RoomError::RoomFull`] if both seats are taken,
    /// [`RoomError::Closed`] if the room already lost a player. Either
    /// way the room is untouched.
    pub fn add_player(&mut self, id: PlayerId) -> Result<Outbound, RoomError> {
        if !self.phase.is_joinable() {
            return Err(if self.players.len() >= MAX_PLAYERS {
                RoomError::RoomFull(self.room_id.clone())
            } else {
                RoomError::Closed(self.room_id.clone())
            });
        }

        let name = format!("Player {}", self.players.len() + 1);
        self.players.push(Player { id, name });
        self.phase = RoomPhase::AwaitingWord;

        let first = self.players[rand::rng().random_range(0..self.players.len())].id;
        self.word_setter = Some(first);

        Ok(vec![
            (
                Recipient::All,
                ServerMessage::GameStart {
                    room: self.snapshot(),
                },
            ),
            (
                Recipient::All,
                ServerMessage::SetInitialTurn {
                    first_player_id: first,
                },
            ),
        ])
    }

    /// Starts a new round with `word` as the secret.
    ///
    /// Accepted from either seat whenever the room has an opponent and is
    /// not closed — including mid-round (a reset) and after a round ended
    /// (the swap to the next round). The word is lowercased, checked
    /// against the dictionary, and on success the guess history is
    /// cleared and the opponent is announced as the guesser.
    pub fn set_word(&mut self, sender: PlayerId, word: &str, dict: &Dictionary) -> Outbound {
        let lower = word.to_lowercase();
        if lower.len() != WORD_LENGTH || !dict.contains(&lower) {
            return vec![(
                Recipient::Player(sender),
                ServerMessage::Error {
                    message: format!("'{}' is not a valid word.", word.to_uppercase()),
                },
            )];
        }

        if !self.phase.accepts_word() {
            return Vec::new();
        }
        let Some(opponent) = self.opponent_of(sender) else {
            return Vec::new();
        };

        self.secret_word = Some(lower);
        self.guesses.clear();
        self.word_setter = Some(sender);
        self.phase = RoomPhase::Guessing;

        vec![(Recipient::All, ServerMessage::NewRound { turn: opponent })]
    }

    /// Scores a guess against the current secret.
    ///
    /// A word the dictionary rejects earns the sender a private
    /// `invalidGuess` and nothing else. An accepted guess is appended to
    /// the history (stored uppercase) and the full history is broadcast.
    /// The round ends when the guess equals the secret or the history
    /// reaches [`MAX_GUESSES`]; the final guesser becomes the next
    /// word-setter.
    pub fn guess(&mut self, sender: PlayerId, guess: &str, dict: &Dictionary) -> Outbound {
        let lower = guess.to_lowercase();
        if lower.len() != WORD_LENGTH || !dict.contains(&lower) {
            return vec![(
                Recipient::Player(sender),
                ServerMessage::InvalidGuess {
                    message: format!("'{}' is not in the word list.", guess.to_uppercase()),
                },
            )];
        }

        if !self.phase.accepts_guesses() {
            return Vec::new();
        }
        let Some(secret) = self.secret_word.clone() else {
            return Vec::new();
        };

        let feedback = evaluate(&lower, &secret);
        self.guesses.push(GuessRecord {
            text: lower.to_uppercase(),
            feedback,
        });

        let mut out = vec![(
            Recipient::All,
            ServerMessage::GuessResult {
                guesses: self.guesses.clone(),
            },
        )];

        let is_winner = lower == secret;
        if is_winner || self.guesses.len() >= MAX_GUESSES {
            self.phase = RoomPhase::RoundOver;
            self.word_setter = Some(sender);
            out.push((
                Recipient::All,
                ServerMessage::RoundOver {
                    is_winner,
                    secret_word: secret.to_uppercase(),
                    next_turn: sender,
                },
            ));
        }

        out
    }

    /// Removes a player and closes the room to further play.
    ///
    /// Returns `None` if the player was not seated here. The departure
    /// notice goes to whoever remains (dispatch happens after removal, so
    /// the leaver never receives it).
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Outbound> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        self.players.remove(idx);
        self.phase = RoomPhase::Closed;

        Some(vec![(
            Recipient::All,
            ServerMessage::PlayerLeft {
                message: "The other player has left the game.".to_string(),
            },
        )])
    }

    /// The room state both players receive when the match starts.
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.room_id.clone(),
            players: self.players.clone(),
            guesses: self.guesses.clone(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn contains_player(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn guesses(&self) -> &[GuessRecord] {
        &self.guesses
    }

    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    /// The player last announced as word-setter, if any.
    pub fn word_setter(&self) -> Option<PlayerId> {
        self.word_setter
    }

    fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        self.players.iter().map(|p| p.id).find(|pid| *pid != id)
    }
}

// =========================================================================
// Tests
// =========================================================================
