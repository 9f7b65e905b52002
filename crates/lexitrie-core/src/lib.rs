//! Shared primitives for lexitrie dictionaries.
//!
//! - [`pos`] -- logical dictionary positions and layout-wide constants
//! - [`limits`] -- traversal ceilings that keep walks over corrupt data finite

pub mod limits;
pub mod pos;

pub use limits::TraversalLimits;
pub use pos::{DictPos, MAX_WORD_LENGTH, NOT_A_DICT_POS};
