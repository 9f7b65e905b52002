// Logical dictionary positions and layout-wide constants

/// A logical offset into a dictionary's two-segment address space.
///
/// Positions `0..original_size` address the original segment, positions
/// from `original_size` up to the tail address the additional segment.
/// Relative offsets stored in the trie are signed, so positions are kept
/// signed as well.
pub type DictPos = i32;

/// Sentinel meaning "not a valid dictionary position".
///
/// Used as the cursor value once a traversal has ended or failed.
pub const NOT_A_DICT_POS: DictPos = i32::MIN;

/// Maximum number of code points in a dictionary word.
///
/// Every trie level consumes at least one code point, so this also bounds
/// the depth of any well-formed trie.
pub const MAX_WORD_LENGTH: usize = 48;
