use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::checksum;
use crate::error::{FrameError, Result};

/// Frame terminator. Never appears inside a frame.
pub const DELIMITER: u8 = 0x00;

/// Overhead value of a full block (254 data bytes, no implied delimiter).
pub const MAX_BLOCK_SIZE: u8 = 0xFF;

/// Maximum number of data bytes carried by one block.
pub const MAX_BLOCK_DATA: usize = MAX_BLOCK_SIZE as usize - 1;

/// Advisory maximum frame size used to spot stream desynchronization.
///
/// The codec never checks this. Transports are expected to drop anything
/// longer before handing it to the decoder.
pub const MAX_FRAME_SIZE: usize = 1024;

/// Upper bound on the encoded size of a payload of `payload_len` bytes.
///
/// Counts the checksum byte, one overhead byte per 254 data bytes, the
/// overhead byte of the final block and the trailing delimiter.
pub fn max_encoded_len(payload_len: usize) -> usize {
    let extended = payload_len + 1;
    extended + extended / MAX_BLOCK_DATA + 2
}

/// Encode a payload into a freshly allocated frame.
pub fn encode(payload: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(max_encoded_len(payload.len()));
    encode_frame(payload, &mut dst);
    dst.freeze()
}

/// Encode a payload and append the frame to `dst`.
///
/// Returns the number of bytes written.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────────────────┬─────┬──────────┬───────────┐
/// │ Overhead │ Data                 │ ... │ Overhead │ Delimiter │
/// │ (1..255) │ (Overhead - 1 bytes) │     │          │ 0x00      │
/// └──────────┴──────────────────────┴─────┴──────────┴───────────┘
/// ```
/// The blocks carry the payload followed by its XOR checksum. A source
/// `0x00` closes the current block and is not written; the decoder puts it
/// back between blocks that are not full.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> usize {
    let crc = checksum(payload);
    let start = dst.len();
    dst.reserve(max_encoded_len(payload.len()));

    let mut overhead_idx = dst.len();
    dst.put_u8(DELIMITER);
    let mut overhead: u8 = 1;

    for &byte in payload.iter().chain(std::iter::once(&crc)) {
        if byte != DELIMITER {
            dst.put_u8(byte);
            overhead += 1;
        }

        if byte == DELIMITER || overhead == MAX_BLOCK_SIZE {
            dst[overhead_idx] = overhead;
            overhead = 1;
            overhead_idx = dst.len();
            dst.put_u8(DELIMITER);
        }
    }

    dst[overhead_idx] = overhead;
    dst.put_u8(DELIMITER);

    let written = dst.len() - start;
    tracing::trace!(payload_len = payload.len(), frame_len = written, "encoded frame");
    written
}

/// Decode one frame, returning the validated payload.
///
/// Scanning stops at the first delimiter; anything after it is ignored. A
/// frame with no delimiter is decoded as far as it goes and still has to
/// pass the checksum.
pub fn decode_frame(frame: &[u8]) -> Result<Bytes> {
    let mut out = BytesMut::with_capacity(frame.len());
    let mut remaining: u8 = 0;
    // The first block has no predecessor, so no delimiter is restored before it.
    let mut previous_full = true;
    let mut terminated = false;

    for &byte in frame {
        if remaining > 0 {
            out.put_u8(byte);
            remaining -= 1;
            continue;
        }

        if byte == DELIMITER {
            terminated = true;
            break;
        }

        if !previous_full {
            out.put_u8(DELIMITER);
        }
        previous_full = byte == MAX_BLOCK_SIZE;
        remaining = byte - 1;
    }

    let Some(received) = out.last().copied() else {
        tracing::debug!(frame_len = frame.len(), terminated, "frame carried no checksum byte");
        return Err(FrameError::EmptyOrTruncatedFrame);
    };
    out.truncate(out.len() - 1);

    let actual = checksum(&out);
    if actual != received {
        tracing::debug!(
            frame_len = frame.len(),
            terminated,
            expected = received,
            actual,
            "frame failed checksum"
        );
        return Err(FrameError::ChecksumMismatch {
            expected: received,
            actual,
        });
    }

    tracing::trace!(frame_len = frame.len(), payload_len = out.len(), "decoded frame");
    Ok(out.freeze())
}

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Largest frame a transport should pass to the decoder. Default: 1024.
    pub max_frame_size: usize,
}

impl CodecConfig {
    /// True when a received frame of `frame_len` bytes should be discarded
    /// instead of decoded.
    pub fn exceeds_max_frame(&self, frame_len: usize) -> bool {
        frame_len > self.max_frame_size
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_frame_size: MAX_FRAME_SIZE,
        }
    }
}
