//! Per-connection handler: the session controller.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Derive the player's identity from the connection handle
//!   2. Announce it with `connected`
//!   3. Loop: decode inbound actions → route through the registry
//!   4. On close: remove the player from their room, notify the peer
//!
//! All outbound traffic funnels through one channel and one writer task
//! per connection, so room broadcasts and private replies keep their
//! relative order and room actors never block on a slow socket.

use std::sync::Arc;

use tokio::sync::mpsc;
use wordduel_protocol::{ClientMessage, Codec, PlayerId, ServerMessage};
use wordduel_room::{PlayerSender, RoomError};
use wordduel_transport::{Connection, WebSocketConnection};

use crate::WordDuelError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), WordDuelError> {
    // Identity is the connection handle — nothing to authenticate.
    let player_id = PlayerId(conn.id().into_inner());
    tracing::info!(%player_id, "player connected");

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerMessage>();
    let writer_conn = conn.clone();
    let codec = state.codec;
    let writer = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let bytes = match codec.encode(&msg) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode outbound message");
                    continue;
                }
            };
            if writer_conn.send(&bytes).await.is_err() {
                break;
            }
        }
    });

    let _ = out_tx.send(ServerMessage::Connected { player_id });

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        };

        let msg: ClientMessage = match state.codec.decode(&data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "ignoring undecodable message");
                continue;
            }
        };

        handle_message(&state, player_id, msg, &out_tx).await;
    }

    remove_from_room(&state, player_id).await;

    // Drop our sender so the writer drains the departure's messages and
    // then exits (the room actor released its clone during removal).
    drop(out_tx);
    let _ = writer.await;

    tracing::info!(%player_id, "player disconnected");
    Ok(())
}

/// Routes one inbound action through the registry.
async fn handle_message(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    msg: ClientMessage,
    out_tx: &PlayerSender,
) {
    match msg {
        ClientMessage::CreateRoom => {
            let result = state
                .registry
                .lock()
                .await
                .create_room(player_id, out_tx.clone());
            match result {
                Ok(room_id) => {
                    let _ = out_tx.send(ServerMessage::RoomCreated { room_id });
                }
                Err(e) => send_error(out_tx, &e),
            }
        }

        ClientMessage::JoinRoom { room_id } => {
            let result = state
                .registry
                .lock()
                .await
                .join_room(player_id, &room_id, out_tx.clone())
                .await;
            // On success the room itself broadcasts gameStart and the
            // first-turn draw; only failures are answered here.
            if let Err(e) = result {
                send_error(out_tx, &e);
            }
        }

        ClientMessage::SetWord { word } => {
            let result = state.registry.lock().await.set_word(player_id, word).await;
            if let Err(e) = result {
                // No room (or a room that just died) — a benign race,
                // not worth an error to the client.
                tracing::debug!(%player_id, error = %e, "set-word dropped");
            }
        }

        ClientMessage::MakeGuess { guess } => {
            let result = state
                .registry
                .lock()
                .await
                .make_guess(player_id, guess)
                .await;
            if let Err(e) = result {
                tracing::debug!(%player_id, error = %e, "guess dropped");
            }
        }

        ClientMessage::LeaveRoom => {
            remove_from_room(state, player_id).await;
        }
    }
}

/// Sends a private error reply.
fn send_error(out_tx: &PlayerSender, error: &RoomError) {
    let _ = out_tx.send(ServerMessage::Error {
        message: error.to_string(),
    });
}

/// Removes the player from whichever room holds them. Idempotent — a
/// connection that never joined a room is a no-op.
async fn remove_from_room(state: &Arc<ServerState>, player_id: PlayerId) {
    let removed = state
        .registry
        .lock()
        .await
        .remove_connection(player_id)
        .await;
    if let Some(room_id) = removed {
        tracing::info!(%player_id, %room_id, "player left room");
    }
}
