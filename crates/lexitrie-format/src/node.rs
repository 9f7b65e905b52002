// PtNode flags, record decoding and decoded node parameters.
//
// Dynamic PtNode record:
//
//   flags           1 byte
//   parent offset   3 bytes, s24, relative to the node head (0 = root level)
//   code points     one code point, or a run closed by the terminator
//                   when HAS_MULTIPLE_CHARS is set
//   probability     1 byte, terminal nodes only
//   children offset 3 bytes, s24, relative to the field (0 = no children)
//   shortcut list   u16 total size (size field included), if HAS_SHORTCUT_TARGETS
//   bigram list     flag byte + address bytes per entry, if HAS_BIGRAMS
//
// A moved node keeps its original record in place; its parent offset field
// then points at the relocated record instead of the parent.

use lexitrie_core::{DictPos, MAX_WORD_LENGTH, NOT_A_DICT_POS};

use crate::FormatError;
use crate::codec;

pub const MASK_MOVED: u8 = 0xC0;
pub const FLAG_IS_NOT_MOVED: u8 = 0xC0;
pub const FLAG_IS_MOVED: u8 = 0x40;
pub const FLAG_IS_DELETED: u8 = 0x80;
pub const FLAG_HAS_MULTIPLE_CHARS: u8 = 0x20;
pub const FLAG_IS_TERMINAL: u8 = 0x10;
pub const FLAG_HAS_SHORTCUT_TARGETS: u8 = 0x08;
pub const FLAG_HAS_BIGRAMS: u8 = 0x04;
pub const FLAG_IS_NOT_A_WORD: u8 = 0x02;
pub const FLAG_IS_BLACKLISTED: u8 = 0x01;

const FLAG_BIGRAM_HAS_NEXT: u8 = 0x80;
const MASK_BIGRAM_ADDRESS_TYPE: u8 = 0x30;

/// Upper bound on bigram entries in a single list.
pub const MAX_BIGRAM_COUNT: usize = 10_000;

/// Decoded facts about one PtNode, in logical positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtNodeParams {
    /// Position of the record that was read (the original record for moved nodes).
    pub head_pos: DictPos,
    pub flags: u8,
    /// Parent node, or [`NOT_A_DICT_POS`] on the root level.
    pub parent_pos: DictPos,
    pub code_point_count: usize,
    pub probability: Option<u8>,
    /// Head of the children node array, or [`NOT_A_DICT_POS`].
    pub children_pos: DictPos,
    /// Position right after this record; the next sibling or the forward link.
    pub sibling_pos: DictPos,
}

impl Default for PtNodeParams {
    fn default() -> Self {
        Self {
            head_pos: NOT_A_DICT_POS,
            flags: 0,
            parent_pos: NOT_A_DICT_POS,
            code_point_count: 0,
            probability: None,
            children_pos: NOT_A_DICT_POS,
            sibling_pos: NOT_A_DICT_POS,
        }
    }
}

impl PtNodeParams {
    #[inline]
    pub fn has_children(&self) -> bool {
        self.children_pos != NOT_A_DICT_POS
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.flags & FLAG_IS_TERMINAL != 0
    }

    #[inline]
    pub fn is_moved(&self) -> bool {
        is_moved(self.flags)
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.flags & MASK_MOVED == FLAG_IS_DELETED
    }

    #[inline]
    pub fn is_not_a_word(&self) -> bool {
        self.flags & FLAG_IS_NOT_A_WORD != 0
    }

    #[inline]
    pub fn is_blacklisted(&self) -> bool {
        self.flags & FLAG_IS_BLACKLISTED != 0
    }
}

#[inline]
pub fn is_moved(flags: u8) -> bool {
    flags & MASK_MOVED == FLAG_IS_MOVED
}

/// A PtNode record with offsets still relative to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtNodeRecord {
    pub flags: u8,
    /// Raw parent (or relocation) offset, relative to the head.
    pub parent_offset: i32,
    pub code_point_count: usize,
    pub probability: Option<u8>,
    /// Distance from the head to the children offset field.
    pub children_field_delta: usize,
    /// Raw children offset, relative to the children field.
    pub children_offset: i32,
    /// Total record size in bytes.
    pub size: usize,
}

/// Decode one PtNode record at a segment-relative cursor.
///
/// `head_pos` is the logical position of the record; it only labels errors.
pub fn decode_record(
    buf: &[u8],
    pos: &mut usize,
    head_pos: DictPos,
) -> Result<PtNodeRecord, FormatError> {
    let start = *pos;
    let flags = codec::read_u8(buf, pos)?;
    let parent_offset = codec::read_s24(buf, pos)?;

    let code_point_count = if flags & FLAG_HAS_MULTIPLE_CHARS != 0 {
        let mut count = 0;
        while codec::read_code_point(buf, pos)?.is_some() {
            count += 1;
            if count > MAX_WORD_LENGTH {
                return Err(FormatError::CodePointRunTooLong { pos: head_pos });
            }
        }
        count
    } else {
        usize::from(codec::read_code_point(buf, pos)?.is_some())
    };

    let probability = if flags & FLAG_IS_TERMINAL != 0 {
        Some(codec::read_u8(buf, pos)?)
    } else {
        None
    };

    let children_field_delta = *pos - start;
    let children_offset = codec::read_s24(buf, pos)?;

    if flags & FLAG_HAS_SHORTCUT_TARGETS != 0 {
        let list_size = usize::from(codec::read_u16(buf, pos)?);
        let rest = list_size.saturating_sub(2);
        if buf.len().saturating_sub(*pos) < rest {
            return Err(FormatError::Truncated { offset: *pos });
        }
        *pos += rest;
    }

    if flags & FLAG_HAS_BIGRAMS != 0 {
        skip_bigram_list(buf, pos, head_pos)?;
    }

    Ok(PtNodeRecord {
        flags,
        parent_offset,
        code_point_count,
        probability,
        children_field_delta,
        children_offset,
        size: *pos - start,
    })
}

fn skip_bigram_list(buf: &[u8], pos: &mut usize, head_pos: DictPos) -> Result<(), FormatError> {
    for _ in 0..MAX_BIGRAM_COUNT {
        let entry_flags = codec::read_u8(buf, pos)?;
        let address_size = usize::from((entry_flags & MASK_BIGRAM_ADDRESS_TYPE) >> 4);
        if buf.len().saturating_sub(*pos) < address_size {
            return Err(FormatError::Truncated { offset: *pos });
        }
        *pos += address_size;
        if entry_flags & FLAG_BIGRAM_HAS_NEXT == 0 {
            return Ok(());
        }
    }
    Err(FormatError::UnterminatedBigramList { pos: head_pos })
}
