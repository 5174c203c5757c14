//! End-to-end tests: a real server with real WebSocket clients.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use wordduel::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let dictionary = Dictionary::from_words(["apple", "angle", "crane", "slate"]);
    let server = WordDuelServerBuilder::new()
        .bind("127.0.0.1:0")
        .build(dictionary)
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn recv_msg(ws: &mut ClientWs) -> ServerMessage {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a server message")
            .expect("connection ended")
            .expect("websocket error");
        if msg.is_binary() || msg.is_text() {
            return serde_json::from_slice(&msg.into_data())
                .expect("server sent invalid JSON");
        }
    }
}

async fn send_msg(ws: &mut ClientWs, msg: &ClientMessage) {
    let bytes = serde_json::to_vec(msg).unwrap();
    ws.send(Message::Binary(bytes.into())).await.unwrap();
}

/// Connects and consumes the `connected` greeting.
async fn connect(addr: &str) -> (ClientWs, PlayerId) {
    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    match recv_msg(&mut ws).await {
        ServerMessage::Connected { player_id } => (ws, player_id),
        other => panic!("expected connected first, got {other:?}"),
    }
}

/// Creates a room with one client and joins a second, draining the
/// start broadcasts for both.
async fn setup_match(addr: &str) -> (ClientWs, PlayerId, ClientWs, PlayerId, RoomId) {
    let (mut p1, id1) = connect(addr).await;
    let (mut p2, id2) = connect(addr).await;

    send_msg(&mut p1, &ClientMessage::CreateRoom).await;
    let room_id = match recv_msg(&mut p1).await {
        ServerMessage::RoomCreated { room_id } => room_id,
        other => panic!("expected roomCreated, got {other:?}"),
    };

    send_msg(
        &mut p2,
        &ClientMessage::JoinRoom {
            room_id: room_id.clone(),
        },
    )
    .await;

    for ws in [&mut p1, &mut p2] {
        match recv_msg(ws).await {
            ServerMessage::GameStart { room } => {
                assert_eq!(room.id, room_id);
                assert_eq!(room.players.len(), 2);
            }
            other => panic!("expected gameStart, got {other:?}"),
        }
        match recv_msg(ws).await {
            ServerMessage::SetInitialTurn { first_player_id } => {
                assert!(first_player_id == id1 || first_player_id == id2);
            }
            other => panic!("expected setInitialTurn, got {other:?}"),
        }
    }

    (p1, id1, p2, id2, room_id)
}

/// Starts a round with "apple" as the secret, set by player 1.
async fn start_round(p1: &mut ClientWs, p2: &mut ClientWs, guesser: PlayerId) {
    send_msg(
        p1,
        &ClientMessage::SetWord {
            word: "apple".into(),
        },
    )
    .await;
    for ws in [p1, p2] {
        match recv_msg(ws).await {
            ServerMessage::NewRound { turn } => assert_eq!(turn, guesser),
            other => panic!("expected newRound, got {other:?}"),
        }
    }
}

// =========================================================================
// Connection and room management
// =========================================================================

#[tokio::test]
async fn test_each_connection_gets_its_own_id() {
    let addr = start_server().await;
    let (_ws1, id1) = connect(&addr).await;
    let (_ws2, id2) = connect(&addr).await;
    assert_ne!(id1, id2);
}

#[tokio::test]
async fn test_create_room_returns_a_six_char_code() {
    let addr = start_server().await;
    let (mut p1, _) = connect(&addr).await;

    send_msg(&mut p1, &ClientMessage::CreateRoom).await;
    match recv_msg(&mut p1).await {
        ServerMessage::RoomCreated { room_id } => {
            assert_eq!(room_id.as_str().len(), 6);
            assert!(
                room_id
                    .as_str()
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
        other => panic!("expected roomCreated, got {other:?}"),
    }
}

#[tokio::test]
async fn test_join_unknown_room_is_a_private_error() {
    let addr = start_server().await;
    let (mut p1, _) = connect(&addr).await;

    send_msg(
        &mut p1,
        &ClientMessage::JoinRoom {
            room_id: RoomId::new("NOPE99"),
        },
    )
    .await;

    assert!(matches!(
        recv_msg(&mut p1).await,
        ServerMessage::Error { .. }
    ));
}

#[tokio::test]
async fn test_third_player_cannot_join() {
    let addr = start_server().await;
    let (_p1, _, _p2, _, room_id) = setup_match(&addr).await;

    let (mut p3, _) = connect(&addr).await;
    send_msg(&mut p3, &ClientMessage::JoinRoom { room_id }).await;

    assert!(matches!(
        recv_msg(&mut p3).await,
        ServerMessage::Error { .. }
    ));
}

#[tokio::test]
async fn test_garbage_frames_are_ignored() {
    let addr = start_server().await;
    let (mut p1, _) = connect(&addr).await;

    p1.send(Message::Text("this is not a message".into()))
        .await
        .unwrap();

    // The connection survives and still serves requests.
    send_msg(&mut p1, &ClientMessage::CreateRoom).await;
    assert!(matches!(
        recv_msg(&mut p1).await,
        ServerMessage::RoomCreated { .. }
    ));
}

// =========================================================================
// Rounds
// =========================================================================

#[tokio::test]
async fn test_set_word_starts_the_round() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, id2, _) = setup_match(&addr).await;

    // Both players hear that player 2 now guesses.
    start_round(&mut p1, &mut p2, id2).await;
}

#[tokio::test]
async fn test_guess_is_scored_and_broadcast() {
    use wordduel::LetterFeedback::{Gray, Green};

    let addr = start_server().await;
    let (mut p1, _, mut p2, id2, _) = setup_match(&addr).await;
    start_round(&mut p1, &mut p2, id2).await;

    send_msg(
        &mut p2,
        &ClientMessage::MakeGuess {
            guess: "angle".into(),
        },
    )
    .await;

    for ws in [&mut p1, &mut p2] {
        match recv_msg(ws).await {
            ServerMessage::GuessResult { guesses } => {
                assert_eq!(guesses.len(), 1);
                assert_eq!(guesses[0].text, "ANGLE");
                assert_eq!(guesses[0].feedback, [Green, Gray, Gray, Green, Green]);
            }
            other => panic!("expected guessResult, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_winning_guess_ends_the_round() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, id2, _) = setup_match(&addr).await;
    start_round(&mut p1, &mut p2, id2).await;

    send_msg(
        &mut p2,
        &ClientMessage::MakeGuess {
            guess: "apple".into(),
        },
    )
    .await;

    for ws in [&mut p1, &mut p2] {
        match recv_msg(ws).await {
            ServerMessage::GuessResult { guesses } => assert_eq!(guesses.len(), 1),
            other => panic!("expected guessResult, got {other:?}"),
        }
        match recv_msg(ws).await {
            ServerMessage::RoundOver {
                is_winner,
                secret_word,
                next_turn,
            } => {
                assert!(is_winner);
                assert_eq!(secret_word, "APPLE");
                assert_eq!(next_turn, id2);
            }
            other => panic!("expected roundOver, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_six_misses_lose_the_round() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, id2, _) = setup_match(&addr).await;
    start_round(&mut p1, &mut p2, id2).await;

    for round in 1..=6usize {
        send_msg(
            &mut p2,
            &ClientMessage::MakeGuess {
                guess: "angle".into(),
            },
        )
        .await;
        for ws in [&mut p1, &mut p2] {
            match recv_msg(ws).await {
                ServerMessage::GuessResult { guesses } => assert_eq!(guesses.len(), round),
                other => panic!("expected guessResult, got {other:?}"),
            }
        }
    }

    for ws in [&mut p1, &mut p2] {
        match recv_msg(ws).await {
            ServerMessage::RoundOver {
                is_winner,
                secret_word,
                next_turn,
            } => {
                assert!(!is_winner);
                assert_eq!(secret_word, "APPLE");
                assert_eq!(next_turn, id2);
            }
            other => panic!("expected roundOver, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_invalid_guess_only_reaches_the_guesser() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, id2, _) = setup_match(&addr).await;
    start_round(&mut p1, &mut p2, id2).await;

    send_msg(
        &mut p2,
        &ClientMessage::MakeGuess {
            guess: "qqqqq".into(),
        },
    )
    .await;
    match recv_msg(&mut p2).await {
        ServerMessage::InvalidGuess { message } => {
            assert_eq!(message, "'QQQQQ' is not in the word list.");
        }
        other => panic!("expected invalidGuess, got {other:?}"),
    }

    // The setter's next message is the result of a valid guess — the
    // rejection never reached them.
    send_msg(
        &mut p2,
        &ClientMessage::MakeGuess {
            guess: "angle".into(),
        },
    )
    .await;
    assert!(matches!(
        recv_msg(&mut p1).await,
        ServerMessage::GuessResult { .. }
    ));
}

#[tokio::test]
async fn test_roles_swap_after_the_round() {
    let addr = start_server().await;
    let (mut p1, id1, mut p2, id2, _) = setup_match(&addr).await;
    start_round(&mut p1, &mut p2, id2).await;

    send_msg(
        &mut p2,
        &ClientMessage::MakeGuess {
            guess: "apple".into(),
        },
    )
    .await;
    for ws in [&mut p1, &mut p2] {
        let _ = recv_msg(ws).await; // guessResult
        let _ = recv_msg(ws).await; // roundOver
    }

    // Player 2 sets the next word; player 1 guesses.
    send_msg(
        &mut p2,
        &ClientMessage::SetWord {
            word: "crane".into(),
        },
    )
    .await;
    for ws in [&mut p1, &mut p2] {
        match recv_msg(ws).await {
            ServerMessage::NewRound { turn } => assert_eq!(turn, id1),
            other => panic!("expected newRound, got {other:?}"),
        }
    }
}

// =========================================================================
// Departures
// =========================================================================

#[tokio::test]
async fn test_disconnect_notifies_the_opponent() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, _, _) = setup_match(&addr).await;

    p1.close(None).await.unwrap();

    match recv_msg(&mut p2).await {
        ServerMessage::PlayerLeft { message } => {
            assert_eq!(message, "The other player has left the game.");
        }
        other => panic!("expected playerLeft, got {other:?}"),
    }
}

#[tokio::test]
async fn test_leave_room_allows_a_fresh_start() {
    let addr = start_server().await;
    let (mut p1, _, mut p2, _, old_room) = setup_match(&addr).await;

    send_msg(&mut p1, &ClientMessage::LeaveRoom).await;
    assert!(matches!(
        recv_msg(&mut p2).await,
        ServerMessage::PlayerLeft { .. }
    ));

    // The connection is still usable — a new room, a new code.
    send_msg(&mut p1, &ClientMessage::CreateRoom).await;
    match recv_msg(&mut p1).await {
        ServerMessage::RoomCreated { room_id } => assert_ne!(room_id, old_room),
        other => panic!("expected roomCreated, got {other:?}"),
    }
}
