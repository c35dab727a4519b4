//! Self-delimiting frames for byte streams.
//!
//! Every payload is framed with Consistent Overhead Byte Stuffing (COBS):
//! - A 1-byte XOR checksum appended to the payload
//! - Length-prefixed blocks of at most 254 bytes, none containing `0x00`
//! - A single `0x00` delimiter ending the frame
//!
//! A receiver that loses sync only has to skip to the next `0x00`.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod inspect;
pub mod store;

pub use checksum::checksum;
pub use codec::{
    decode_frame, encode, encode_frame, max_encoded_len, CodecConfig, DELIMITER, MAX_BLOCK_DATA,
    MAX_BLOCK_SIZE, MAX_FRAME_SIZE,
};
pub use error::{FrameError, Result};
pub use inspect::{inspect, BlockInfo, FrameLayout};
pub use store::CobsCodec;
