use bytes::Bytes;

use crate::codec::{decode_frame, encode, CodecConfig};
use crate::error::Result;

/// Stateful codec that keeps the last validated message.
///
/// `decode` replaces the stored message only when a frame passes its
/// checksum; a failed decode leaves the previous message in place. Use
/// [`decode_frame`] directly when the payload should be owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct CobsCodec {
    message: Bytes,
    config: CodecConfig,
}

impl CobsCodec {
    /// Create a codec with default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Create a codec with explicit configuration.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            message: Bytes::new(),
            config,
        }
    }

    /// Encode a payload into a frame.
    pub fn encode(&self, payload: &[u8]) -> Bytes {
        encode(payload)
    }

    /// Decode a frame, storing its payload on success.
    pub fn decode(&mut self, frame: &[u8]) -> bool {
        self.try_decode(frame).is_ok()
    }

    /// Like [`decode`](Self::decode), but reports why a frame was rejected.
    pub fn try_decode(&mut self, frame: &[u8]) -> Result<&[u8]> {
        self.message = decode_frame(frame)?;
        Ok(&self.message)
    }

    /// The payload of the most recent successful decode.
    ///
    /// Empty until the first successful decode.
    pub fn validated_message(&self) -> &[u8] {
        &self.message
    }

    /// Take the stored payload, leaving the store empty.
    pub fn take_message(&mut self) -> Bytes {
        std::mem::take(&mut self.message)
    }

    /// Current codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}
