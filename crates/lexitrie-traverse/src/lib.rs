//! Bounded, iterative traversal over dynamic patricia trie dictionaries.
//!
//! The engine walks node arrays through a [`TrieNodeReader`], following
//! children, siblings and forward links with an explicit state stack instead
//! of recursion. Node and node array ceilings plus a bounded stack make every
//! walk finite, even over corrupt or hostile data.
//!
//! # Architecture
//!
//! - [`state`] -- Reading cursor and the bounded stack of saved cursors
//! - [`listener`] -- [`TraversingEventListener`] and stock listeners
//! - [`helper`] -- [`ReadingHelper`], the traversal driver
//!
//! [`TrieNodeReader`]: lexitrie_format::TrieNodeReader

pub mod helper;
pub mod listener;
pub mod state;

pub use helper::ReadingHelper;
pub use listener::{EventRecorder, TraversalEvent, TraversingEventListener, TrieStats};
pub use state::{ReadingState, ReadingStateStack};

use lexitrie_core::DictPos;
use lexitrie_format::FormatError;

/// Reason a traversal flagged the dictionary as invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraversalError {
    #[error("node array at position {pos} declares negative node count {count}")]
    NegativeNodeCount { pos: DictPos, count: i32 },
    #[error("total node count {count} exceeds limit {limit}")]
    NodeCountOverflow { count: i32, limit: i32 },
    #[error("node array count {count} exceeds limit {limit}")]
    NodeArrayCountOverflow { count: i32, limit: i32 },
    #[error("reading state stack exceeds maximum depth {limit}")]
    StackOverflow { limit: usize },
    #[error("position {pos} is outside the dictionary (tail {tail})")]
    InvalidPosition { pos: DictPos, tail: usize },
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl TraversalError {
    /// Returns `true` for errors raised by a traversal ceiling: node count,
    /// node array count or stack depth.
    pub fn is_structural_overflow(&self) -> bool {
        matches!(
            self,
            Self::NodeCountOverflow { .. }
                | Self::NodeArrayCountOverflow { .. }
                | Self::StackOverflow { .. }
        )
    }
}
