//! Byte layout of dynamic patricia trie dictionaries.
//!
//! This crate decodes the on-disk structures that the traversal engine walks.
//! It never mutates a dictionary.
//!
//! # Architecture
//!
//! - [`codec`] -- Big-endian integer and code point primitives
//! - [`buffer`] -- Two-segment (original + additional) logical address space
//! - [`node_array`] -- Node array size headers and forward-link fields
//! - [`node`] -- PtNode flags and decoded node parameters
//! - [`reader`] -- [`TrieNodeReader`] trait and the dynamic layout reader
//! - [`header`] -- Dictionary file header and attributes

pub mod buffer;
pub mod codec;
pub mod header;
pub mod node;
pub mod node_array;
pub mod reader;

pub use buffer::{AddressableBuffer, ExtendableBuffer, Segment};
pub use node::PtNodeParams;
pub use node_array::NodeArrayHeader;
pub use reader::{DynamicTrieReader, TrieNodeReader};

use lexitrie_core::DictPos;

/// Error type for decoding dictionary bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("read past end of segment at offset {offset}")]
    Truncated { offset: usize },
    #[error("position {0} is outside the dictionary")]
    InvalidPosition(DictPos),
    #[error("code point run at position {pos} exceeds the maximum word length")]
    CodePointRunTooLong { pos: DictPos },
    #[error("bigram list at position {pos} does not terminate")]
    UnterminatedBigramList { pos: DictPos },
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid magic number in dictionary header")]
    InvalidMagic,
    #[error("unsupported dictionary format version {0}")]
    UnsupportedVersion(u16),
}
