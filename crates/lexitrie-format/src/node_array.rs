// Node array size headers and forward-link fields.
//
// A node array is laid out as:
//
//   [size: 1 or 2 bytes] [PtNode] ... [PtNode] [forward link: 3 bytes]
//
// The forward link is a signed offset from the link field itself to a
// continuation array holding more siblings of the same level. Zero means
// there is no continuation.

use lexitrie_core::DictPos;

use crate::FormatError;
use crate::codec;

/// Encoded "no forward link".
pub const NO_FORWARD_LINK: i32 = 0;

/// Largest node count a size header can express.
pub const MAX_NODE_ARRAY_SIZE: i32 = 0x7FFF;

/// Decoded node array header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeArrayHeader {
    /// Number of PtNodes in the array. Signed so that readers for other
    /// layouts can report corrupt (negative) counts.
    pub node_count: i32,
    /// Position right after the header, i.e. of the first PtNode.
    pub first_node_pos: DictPos,
}

/// Read a node array size and advance past it.
///
/// Sizes below `0x80` take one byte; larger sizes take two bytes with the
/// high bit of the first byte set.
pub fn read_node_array_size(buf: &[u8], pos: &mut usize) -> Result<i32, FormatError> {
    let start = *pos;
    let first = codec::read_u8(buf, pos)?;
    if first < 0x80 {
        return Ok(i32::from(first));
    }
    match codec::read_u8(buf, pos) {
        Ok(second) => Ok((i32::from(first & 0x7F) << 8) | i32::from(second)),
        Err(e) => {
            *pos = start;
            Err(e)
        }
    }
}

/// Read the forward-link offset stored at `pos` without advancing.
pub fn read_forward_link(buf: &[u8], pos: &mut usize) -> Result<i32, FormatError> {
    let mut link_pos = *pos;
    codec::read_s24(buf, &mut link_pos)
}

/// Returns `true` if a forward-link offset points to a continuation array.
#[inline]
pub fn is_valid_forward_link(offset: i32) -> bool {
    offset != NO_FORWARD_LINK
}
