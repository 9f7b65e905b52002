// Node reader seam between the traversal engine and the byte layout.

use lexitrie_core::{DictPos, NOT_A_DICT_POS};

use crate::FormatError;
use crate::buffer::AddressableBuffer;
use crate::node::{self, PtNodeParams, PtNodeRecord};
use crate::node_array::{self, NodeArrayHeader};

/// Decodes the trie structures the traversal engine needs.
///
/// All positions are logical; implementors deal with segments themselves.
pub trait TrieNodeReader {
    /// One past the last addressable position.
    fn tail_position(&self) -> usize;

    /// Read the node array header at `pos`.
    fn read_node_array_header(&self, pos: DictPos) -> Result<NodeArrayHeader, FormatError>;

    /// Read the raw forward-link offset stored at `pos`.
    fn read_forward_link(&self, pos: DictPos) -> Result<i32, FormatError>;

    /// Decode the PtNode whose record starts at `pos`.
    fn fetch_node_info(&self, pos: DictPos) -> Result<PtNodeParams, FormatError>;
}

/// [`TrieNodeReader`] for the dynamic patricia trie layout.
#[derive(Debug)]
pub struct DynamicTrieReader<'a, B> {
    buffer: &'a B,
}

impl<B> Clone for DynamicTrieReader<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for DynamicTrieReader<'_, B> {}

impl<'a, B: AddressableBuffer> DynamicTrieReader<'a, B> {
    pub fn new(buffer: &'a B) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &'a B {
        self.buffer
    }

    fn read_record(&self, pos: DictPos) -> Result<PtNodeRecord, FormatError> {
        let (record, _) = self
            .buffer
            .decode_at(pos, |buf, cursor| node::decode_record(buf, cursor, pos))?;
        Ok(record)
    }
}

/// Resolve a relative offset, mapping zero to the sentinel.
#[inline]
fn resolve(base: DictPos, offset: i32) -> DictPos {
    if offset == 0 {
        NOT_A_DICT_POS
    } else {
        base.saturating_add(offset)
    }
}

impl<B: AddressableBuffer> TrieNodeReader for DynamicTrieReader<'_, B> {
    fn tail_position(&self) -> usize {
        self.buffer.tail_position()
    }

    fn read_node_array_header(&self, pos: DictPos) -> Result<NodeArrayHeader, FormatError> {
        let (node_count, first_node_pos) = self
            .buffer
            .decode_at(pos, node_array::read_node_array_size)?;
        Ok(NodeArrayHeader {
            node_count,
            first_node_pos,
        })
    }

    fn read_forward_link(&self, pos: DictPos) -> Result<i32, FormatError> {
        let (offset, _) = self.buffer.decode_at(pos, node_array::read_forward_link)?;
        Ok(offset)
    }

    fn fetch_node_info(&self, pos: DictPos) -> Result<PtNodeParams, FormatError> {
        let original = self.read_record(pos)?;
        let sibling_pos = pos.saturating_add(original.size as DictPos);

        // A moved record's parent field points at its relocated copy.
        let (content_pos, record) = if node::is_moved(original.flags) {
            let new_pos = resolve(pos, original.parent_offset);
            (new_pos, self.read_record(new_pos)?)
        } else {
            (pos, original)
        };

        let children_field_pos = content_pos.saturating_add(record.children_field_delta as DictPos);
        Ok(PtNodeParams {
            head_pos: pos,
            flags: record.flags,
            parent_pos: resolve(content_pos, record.parent_offset),
            code_point_count: record.code_point_count,
            probability: record.probability,
            children_pos: resolve(children_field_pos, record.children_offset),
            sibling_pos,
        })
    }
}
