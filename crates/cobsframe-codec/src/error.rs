/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The trailing checksum byte disagrees with the reconstructed payload.
    #[error("checksum mismatch (frame carried 0x{expected:02X}, payload folds to 0x{actual:02X})")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// Nothing was reconstructed, so there is no checksum byte to verify.
    #[error("empty or truncated frame (no checksum byte)")]
    EmptyOrTruncatedFrame,
}

pub type Result<T> = std::result::Result<T, FrameError>;
