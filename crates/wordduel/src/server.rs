//! `WordDuelServer` builder and accept loop.
//!
//! The entry point for running a WordDuel server. It wires the layers
//! together: transport → protocol → room.

use std::sync::Arc;

use tokio::sync::Mutex;
use wordduel_protocol::JsonCodec;
use wordduel_room::RoomRegistry;
use wordduel_transport::{Transport, WebSocketTransport};
use wordduel_words::Dictionary;

use crate::WordDuelError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry sits behind a `Mutex`; per-room work happens in the room
/// actors, so the lock only covers map bookkeeping.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a WordDuel server.
///
/// # Example
///
/// ```rust,no_run
/// use wordduel::prelude::*;
///
/// # async fn run() -> Result<(), WordDuelError> {
/// let server = WordDuelServerBuilder::new()
///     .bind("0.0.0.0:4000")
///     .build(Dictionary::from_words(["apple"]))
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct WordDuelServerBuilder {
    bind_addr: String,
}

impl WordDuelServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and assembles the server around the given
    /// word list.
    ///
    /// # Errors
    /// Returns a transport error if the address can't be bound.
    pub async fn build(self, dictionary: Dictionary) -> Result<WordDuelServer, WordDuelError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new(Arc::new(dictionary))),
            codec: JsonCodec,
        });

        Ok(WordDuelServer { transport, state })
    }
}

impl Default for WordDuelServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running WordDuel server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct WordDuelServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl WordDuelServer {
    /// Creates a new builder.
    pub fn builder() -> WordDuelServerBuilder {
        WordDuelServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), WordDuelError> {
        tracing::info!("WordDuel server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
