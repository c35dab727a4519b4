use std::ffi::c_void;

use cobsframe_codec::CobsCodec;

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CobsResult {
    Ok = 0,
    InvalidArgument = 1,
    BufferTooSmall = 2,
    ChecksumMismatch = 3,
    EmptyFrame = 4,
    Internal = 99,
}

#[allow(dead_code)]
pub const COBS_OK: CobsResult = CobsResult::Ok;
#[allow(dead_code)]
pub const COBS_ERR_INVALID_ARGUMENT: CobsResult = CobsResult::InvalidArgument;
#[allow(dead_code)]
pub const COBS_ERR_BUFFER_TOO_SMALL: CobsResult = CobsResult::BufferTooSmall;
#[allow(dead_code)]
pub const COBS_ERR_CHECKSUM_MISMATCH: CobsResult = CobsResult::ChecksumMismatch;
#[allow(dead_code)]
pub const COBS_ERR_EMPTY_FRAME: CobsResult = CobsResult::EmptyFrame;
#[allow(dead_code)]
pub const COBS_ERR_INTERNAL: CobsResult = CobsResult::Internal;

/// Advisory maximum frame size, mirrored for C callers.
pub const COBS_MAX_FRAME_SIZE: usize = cobsframe_codec::MAX_FRAME_SIZE;

pub type CobsCodecHandle = *mut c_void;

pub(crate) struct CodecHandle {
    pub(crate) codec: CobsCodec,
}
