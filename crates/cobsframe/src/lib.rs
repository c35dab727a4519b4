//! Self-delimiting frames for serial and other byte-oriented links.
//!
//! cobsframe wraps a payload with a 1-byte XOR checksum and frames it with
//! Consistent Overhead Byte Stuffing, so `0x00` only ever appears as the frame
//! terminator and a receiver can resynchronize at the next zero byte.
//!
//! # Crate Structure
//!
//! - [`codec`] — Checksum, encoder, decoder and the validated message store

/// Re-export codec types.
pub mod codec {
    pub use cobsframe_codec::*;
}

pub use cobsframe_codec::{decode_frame, encode, CobsCodec, FrameError};
