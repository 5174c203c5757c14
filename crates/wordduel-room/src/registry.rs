//! Room registry: creates, tracks, and routes connections to rooms.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use wordduel_protocol::{PlayerId, RoomId};
use wordduel_words::Dictionary;

use crate::room::spawn_room;
use crate::{Game, PlayerSender, RoomError, RoomHandle};

/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Characters a room code is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a room code.
const CODE_LENGTH: usize = 6;

/// The single source of truth for which rooms exist and which room a
/// given connection is in.
///
/// Nothing else mutates the room map. All game actions route through the
/// reverse index, so connections never need to remember their own room
/// code. The registry itself does no per-room locking — each room's
/// actor serializes its own mutations — so operations on different rooms
/// proceed independently.
pub struct RoomRegistry {
    /// Live rooms, keyed by join code.
    rooms: HashMap<RoomId, RoomHandle>,

    /// Maps each connection to the room it is currently in.
    /// A connection is in at most ONE room at a time (key invariant);
    /// kept in step with `rooms` by every mutation below.
    player_rooms: HashMap<PlayerId, RoomId>,

    /// Shared with every room actor for word validation.
    dictionary: Arc<Dictionary>,
}

impl RoomRegistry {
    /// Creates an empty registry backed by the given word list.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            dictionary,
        }
    }

    /// Creates a room with `player_id` in the first seat and returns the
    /// fresh join code.
    ///
    /// # Errors
    /// Returns [`RoomError::AlreadyInRoom`] if the connection is already
    /// seated somewhere — one room per connection.
    pub fn create_room(
        &mut self,
        player_id: PlayerId,
        sender: PlayerSender,
    ) -> Result<RoomId, RoomError> {
        if let Some(existing) = self.player_rooms.get(&player_id) {
            return Err(RoomError::AlreadyInRoom(player_id, existing.clone()));
        }

        let room_id = self.generate_room_id();
        let game = Game::new(room_id.clone(), player_id);
        let handle = spawn_room(
            game,
            sender,
            Arc::clone(&self.dictionary),
            DEFAULT_CHANNEL_SIZE,
        );

        self.rooms.insert(room_id.clone(), handle);
        self.player_rooms.insert(player_id, room_id.clone());
        tracing::info!(%room_id, %player_id, "room created");
        Ok(room_id)
    }

    /// Draws a fresh 6-character code, re-drawing on the (unlikely)
    /// collision with a live room.
    fn generate_room_id(&self) -> RoomId {
        let mut rng = rand::rng();
        loop {
            let code: String = (0..CODE_LENGTH)
                .map(|_| {
                    let i = rng.random_range(0..CODE_ALPHABET.len());
                    CODE_ALPHABET[i] as char
                })
                .collect();
            let id = RoomId(code);
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }

    /// Seats a connection in an existing room.
    ///
    /// The index entry is only written after the room accepts the join,
    /// so a rejected join leaves no trace.
    ///
    /// # Errors
    /// [`RoomError::AlreadyInRoom`] if the connection is seated
    /// elsewhere, [`RoomError::NotFound`] for an unknown code, or
    /// whatever the room actor rejects with (full, closed, gone).
    pub async fn join_room(
        &mut self,
        player_id: PlayerId,
        room_id: &RoomId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if let Some(existing) = self.player_rooms.get(&player_id) {
            return Err(RoomError::AlreadyInRoom(player_id, existing.clone()));
        }

        let handle = self
            .rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))?;

        handle.join(player_id, sender).await?;
        self.player_rooms.insert(player_id, room_id.clone());
        Ok(())
    }

    /// Routes a set-word action to the sender's room.
    ///
    /// # Errors
    /// [`RoomError::NoActiveRoom`] if the connection is not in a room —
    /// callers treat this as a benign race, not a failure.
    pub async fn set_word(
        &self,
        player_id: PlayerId,
        word: String,
    ) -> Result<(), RoomError> {
        self.handle_for(player_id)?.set_word(player_id, word).await
    }

    /// Routes a guess to the sender's room.
    ///
    /// # Errors
    /// Same contract as [`set_word`](Self::set_word).
    pub async fn make_guess(
        &self,
        player_id: PlayerId,
        word: String,
    ) -> Result<(), RoomError> {
        self.handle_for(player_id)?.guess(player_id, word).await
    }

    /// Looks up the handle for the room a connection is in.
    fn handle_for(&self, player_id: PlayerId) -> Result<&RoomHandle, RoomError> {
        let room_id = self
            .player_rooms
            .get(&player_id)
            .ok_or(RoomError::NoActiveRoom(player_id))?;
        self.rooms
            .get(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.clone()))
    }

    /// Removes a connection from whichever room holds it, destroying the
    /// room if it is now empty. Idempotent: returns `None` if the
    /// connection was not in any room.
    pub async fn remove_connection(&mut self, player_id: PlayerId) -> Option<RoomId> {
        let room_id = self.player_rooms.remove(&player_id)?;

        if let Some(handle) = self.rooms.get(&room_id) {
            match handle.leave(player_id).await {
                Ok(0) | Err(_) => {
                    // Empty room, or the actor is already gone — either
                    // way the handle is dead weight.
                    self.rooms.remove(&room_id);
                    tracing::info!(%room_id, "room destroyed");
                }
                Ok(_) => {}
            }
        }

        Some(room_id)
    }

    /// Returns the room a connection is currently in, if any.
    pub fn room_of(&self, player_id: &PlayerId) -> Option<&RoomId> {
        self.player_rooms.get(player_id)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Join codes of all live rooms.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }
}
