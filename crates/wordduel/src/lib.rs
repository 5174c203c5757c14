//! # WordDuel
//!
//! Real-time session server for a two-player word-guessing game: one
//! player sets a secret five-letter word, the other guesses it, the
//! server scores every guess and broadcasts the state of the match to
//! both sides until the round ends — then the roles swap.
//!
//! This crate ties the layers together: transport → protocol → room.
//! Each accepted connection gets a handler task (the session
//! controller); each room runs as its own actor task.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordduel::prelude::*;
//!
//! # async fn run() -> Result<(), WordDuelError> {
//! let dictionary = Dictionary::from_words(["apple", "angle", "crane"]);
//! let server = WordDuelServerBuilder::new()
//!     .bind("0.0.0.0:4000")
//!     .build(dictionary)
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::WordDuelError;
pub use server::{WordDuelServer, WordDuelServerBuilder};

pub use wordduel_protocol::{
    ClientMessage, Codec, GuessRecord, JsonCodec, LetterFeedback, Player,
    PlayerId, Recipient, RoomId, RoomSnapshot, ServerMessage, WORD_LENGTH,
};
pub use wordduel_room::{
    Game, MAX_GUESSES, MAX_PLAYERS, RoomError, RoomPhase, RoomRegistry, evaluate,
};
pub use wordduel_words::{Dictionary, WordsError};

/// The types most embedders need in one import.
pub mod prelude {
    pub use crate::error::WordDuelError;
    pub use crate::server::{WordDuelServer, WordDuelServerBuilder};
    pub use wordduel_protocol::{
        ClientMessage, GuessRecord, LetterFeedback, Player, PlayerId, RoomId,
        RoomSnapshot, ServerMessage, WORD_LENGTH,
    };
    pub use wordduel_words::Dictionary;
}
