//! Room actor: an isolated Tokio task that owns one match.
//!
//! Each room runs in its own task, fed by an mpsc command channel. The
//! actor is the only owner of the match state, so the two players'
//! actions are linearized by construction, and every broadcast is
//! dispatched inside the same command that produced the state change —
//! players can never observe one without the other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use wordduel_protocol::{PlayerId, Recipient, RoomId, ServerMessage};
use wordduel_words::Dictionary;

use crate::{Game, RoomError};

/// Channel sender for delivering outbound messages to a player's
/// connection task.
pub type PlayerSender = mpsc::UnboundedSender<ServerMessage>;

/// Commands sent to a room actor through its channel.
///
/// Join and leave carry a reply channel because the caller needs the
/// outcome (seat taken? how many players remain?); game actions are
/// fire-and-forget — their outcomes reach players as game messages.
pub(crate) enum RoomCommand {
    /// Seat a player and register their outbound channel.
    Join {
        player_id: PlayerId,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Remove a player. Replies with how many players remain.
    Leave {
        player_id: PlayerId,
        reply: oneshot::Sender<usize>,
    },

    /// Set the secret word for a new round.
    SetWord { player_id: PlayerId, word: String },

    /// Score a guess against the current secret.
    Guess { player_id: PlayerId, word: String },
}

/// Handle to a running room actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper. The
/// [`RoomRegistry`](crate::RoomRegistry) holds one of these per room.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's join code.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Seats a player in the room.
    ///
    /// # Errors
    /// Room-level rejections ([`RoomError::RoomFull`],
    /// [`RoomError::Closed`]) come back from the actor;
    /// [`RoomError::Unavailable`] means the actor already stopped.
    pub async fn join(
        &self,
        player_id: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_id,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?
    }

    /// Removes a player; returns how many players remain.
    pub async fn leave(&self, player_id: PlayerId) -> Result<usize, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                player_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Sends a set-word action (fire-and-forget).
    pub async fn set_word(
        &self,
        player_id: PlayerId,
        word: String,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::SetWord { player_id, word })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Sends a guess action (fire-and-forget).
    pub async fn guess(
        &self,
        player_id: PlayerId,
        word: String,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Guess { player_id, word })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    game: Game,
    dictionary: Arc<Dictionary>,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until the room empties out.
    async fn run(mut self) {
        tracing::info!(room_id = %self.game.room_id(), "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player_id,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player_id, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { player_id, reply } => {
                    self.handle_leave(player_id);
                    let remaining = self.game.player_count();
                    let _ = reply.send(remaining);
                    if remaining == 0 {
                        break;
                    }
                }
                RoomCommand::SetWord { player_id, word } => {
                    self.handle_set_word(player_id, &word);
                }
                RoomCommand::Guess { player_id, word } => {
                    self.handle_guess(player_id, &word);
                }
            }
        }

        tracing::info!(room_id = %self.game.room_id(), "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        // Register the sender before dispatch so the joiner receives the
        // start broadcast too.
        let msgs = self.game.add_player(player_id)?;
        self.senders.insert(player_id, sender);
        tracing::info!(
            room_id = %self.game.room_id(),
            %player_id,
            players = self.game.player_count(),
            "player joined"
        );
        self.dispatch(msgs);
        Ok(())
    }

    fn handle_leave(&mut self, player_id: PlayerId) {
        // Drop the leaver's sender first so the departure notice only
        // reaches whoever stays behind.
        self.senders.remove(&player_id);
        if let Some(msgs) = self.game.remove_player(player_id) {
            tracing::info!(
                room_id = %self.game.room_id(),
                %player_id,
                players = self.game.player_count(),
                "player left"
            );
            self.dispatch(msgs);
        }
    }

    fn handle_set_word(&mut self, player_id: PlayerId, word: &str) {
        if !self.game.contains_player(player_id) {
            tracing::warn!(
                room_id = %self.game.room_id(),
                %player_id,
                "set-word from non-member, ignoring"
            );
            return;
        }
        let msgs = self.game.set_word(player_id, word, &self.dictionary);
        self.dispatch(msgs);
    }

    fn handle_guess(&mut self, player_id: PlayerId, word: &str) {
        if !self.game.contains_player(player_id) {
            tracing::warn!(
                room_id = %self.game.room_id(),
                %player_id,
                "guess from non-member, ignoring"
            );
            return;
        }
        let msgs = self.game.guess(player_id, word, &self.dictionary);
        self.dispatch(msgs);
    }

    /// Delivers outbound messages to the right recipients.
    fn dispatch(&self, msgs: Vec<(Recipient, ServerMessage)>) {
        for (recipient, msg) in msgs {
            match recipient {
                Recipient::All => {
                    for player in self.game.players() {
                        self.send_to(player.id, msg.clone());
                    }
                }
                Recipient::Player(pid) => {
                    self.send_to(pid, msg);
                }
            }
        }
    }

    /// Sends one message to one player. Silently drops if the receiving
    /// connection is already gone.
    fn send_to(&self, player_id: PlayerId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&player_id) {
            let _ = sender.send(msg);
        }
    }
}

/// Spawns a room actor for `game` with the creator's outbound channel
/// already registered, and returns a handle to it.
///
/// `channel_size` bounds the command queue — if it fills up, senders wait.
pub(crate) fn spawn_room(
    game: Game,
    creator_sender: PlayerSender,
    dictionary: Arc<Dictionary>,
    channel_size: usize,
) -> RoomHandle {
    let room_id = game.room_id().clone();
    let (tx, rx) = mpsc::channel(channel_size);

    let mut senders = HashMap::new();
    if let Some(creator) = game.players().first() {
        senders.insert(creator.id, creator_sender);
    }

    let actor = RoomActor {
        game,
        dictionary,
        senders,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
