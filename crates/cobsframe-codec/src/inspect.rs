//! Block-level view of a frame, for diagnostics.

use std::ops::Range;

use crate::codec::{DELIMITER, MAX_BLOCK_SIZE};

/// One block as it sits on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Offset of the overhead byte within the frame.
    pub offset: usize,
    /// The overhead byte itself.
    pub overhead: u8,
    /// Data bytes actually present. Less than `overhead - 1` only when the
    /// input ran out mid-block.
    pub data_len: usize,
}

impl BlockInfo {
    /// Whether the block is full (no delimiter implied after it).
    pub fn is_full(&self) -> bool {
        self.overhead == MAX_BLOCK_SIZE
    }

    /// Whether the input ran out before the block's data did.
    pub fn is_truncated(&self) -> bool {
        self.data_len < usize::from(self.overhead).saturating_sub(1)
    }

    /// Frame offsets of this block's data bytes.
    pub fn data_range(&self) -> Range<usize> {
        let start = self.offset + 1;
        start..start + self.data_len
    }
}

/// The block structure of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    /// Blocks in wire order.
    pub blocks: Vec<BlockInfo>,
    /// Offset of the terminating delimiter, if one was found.
    pub delimiter_offset: Option<usize>,
    /// Bytes following the delimiter, which the decoder ignores.
    pub trailing_len: usize,
}

impl FrameLayout {
    /// True when the frame ended with a delimiter.
    pub fn is_terminated(&self) -> bool {
        self.delimiter_offset.is_some()
    }

    /// Number of bytes the decoder consumes, delimiter included.
    pub fn frame_len(&self) -> usize {
        match self.delimiter_offset {
            Some(offset) => offset + 1,
            None => self
                .blocks
                .last()
                .map(|block| block.data_range().end)
                .unwrap_or(0),
        }
    }

    /// Length of the message the decoder reconstructs, checksum included.
    pub fn decoded_len(&self) -> usize {
        let data: usize = self.blocks.iter().map(|block| block.data_len).sum();
        let restored = self
            .blocks
            .windows(2)
            .filter(|pair| !pair[0].is_full())
            .count();
        data + restored
    }
}

/// Walk the blocks of `frame` without reconstructing the payload.
///
/// Follows the same rules as the decoder: scanning stops at the first
/// overhead position holding the delimiter.
pub fn inspect(frame: &[u8]) -> FrameLayout {
    let mut layout = FrameLayout::default();
    let mut pos = 0;

    while pos < frame.len() {
        let overhead = frame[pos];
        if overhead == DELIMITER {
            layout.delimiter_offset = Some(pos);
            layout.trailing_len = frame.len() - pos - 1;
            break;
        }

        let wanted = usize::from(overhead) - 1;
        let available = frame.len() - pos - 1;
        let data_len = wanted.min(available);
        layout.blocks.push(BlockInfo {
            offset: pos,
            overhead,
            data_len,
        });
        pos += 1 + data_len;
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn worked_example_layout() {
        let layout = inspect(&[0x04, 0x01, 0x02, 0x03, 0x01, 0x00]);

        assert_eq!(
            layout.blocks,
            vec![
                BlockInfo {
                    offset: 0,
                    overhead: 4,
                    data_len: 3,
                },
                BlockInfo {
                    offset: 4,
                    overhead: 1,
                    data_len: 0,
                },
            ]
        );
        assert_eq!(layout.delimiter_offset, Some(5));
        assert_eq!(layout.trailing_len, 0);
        assert_eq!(layout.frame_len(), 6);
        assert_eq!(layout.decoded_len(), 4);
    }

    #[test]
    fn full_block_is_reported() {
        let frame = encode(&[0x01; 253]);
        let layout = inspect(&frame);

        assert_eq!(layout.blocks.len(), 2);
        assert!(layout.blocks[0].is_full());
        assert_eq!(layout.blocks[0].data_len, 254);
        assert!(!layout.blocks[1].is_full());
        assert_eq!(layout.decoded_len(), 254);
    }

    #[test]
    fn truncated_frame_is_unterminated() {
        let layout = inspect(&[0x05, 0x11, 0x22]);

        assert!(!layout.is_terminated());
        assert_eq!(layout.blocks.len(), 1);
        assert!(layout.blocks[0].is_truncated());
        assert_eq!(layout.frame_len(), 3);
    }

    #[test]
    fn trailing_bytes_are_counted() {
        let mut wire = encode(b"abc").to_vec();
        wire.extend_from_slice(&[0xAA, 0xBB]);
        let layout = inspect(&wire);

        assert!(layout.is_terminated());
        assert_eq!(layout.trailing_len, 2);
        assert_eq!(layout.frame_len(), wire.len() - 2);
    }

    #[test]
    fn empty_input_has_no_blocks() {
        let layout = inspect(&[]);
        assert!(layout.blocks.is_empty());
        assert!(!layout.is_terminated());
        assert_eq!(layout.frame_len(), 0);
    }
}
