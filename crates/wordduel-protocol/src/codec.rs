//! Codec trait and implementations for message serialization.
//!
//! The rest of the server never calls `serde_json` directly — it goes
//! through the [`Codec`] trait, so the wire format can be swapped (e.g.
//! for a compact binary codec) without touching handler or room code.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` because a codec is shared across every
/// connection task for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable, so messages can be inspected in browser DevTools while
/// developing a client. Behind the default-on `json` feature flag.
///
/// ## Example
///
/// ```rust
/// use wordduel_protocol::{Codec, JsonCodec, PlayerId, ServerMessage};
///
/// let codec = JsonCodec;
/// let msg = ServerMessage::Connected { player_id: PlayerId(1) };
///
/// let bytes = codec.encode(&msg).unwrap();
/// let decoded: ServerMessage = codec.decode(&bytes).unwrap();
/// assert_eq!(msg, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
