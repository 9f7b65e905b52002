// Traversal ceilings

use crate::pos::MAX_WORD_LENGTH;

/// Default ceiling on PtNodes counted while reading one trie level.
pub const DEFAULT_MAX_TOTAL_NODE_COUNT: i32 = 100_000;

/// Default ceiling on node arrays entered while reading one trie level.
pub const DEFAULT_MAX_NODE_ARRAY_COUNT: i32 = 100_000;

/// Hard bounds applied while walking a trie.
///
/// A well-formed dictionary never comes close to these values. They exist so
/// that a forward-link cycle, a falsified node count or an impossibly deep
/// chain of children ends the walk with an error instead of looping forever.
///
/// With the `serde` feature every field falls back to its default when absent,
/// so a host configuration may override only the ceilings it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TraversalLimits {
    /// Maximum PtNodes summed over all arrays of one level (forward links included).
    pub max_total_node_count: i32,
    /// Maximum node arrays entered on one level (forward links included).
    pub max_node_array_count: i32,
    /// Maximum number of saved reading states, i.e. descent depth.
    pub max_stack_depth: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_total_node_count: DEFAULT_MAX_TOTAL_NODE_COUNT,
            max_node_array_count: DEFAULT_MAX_NODE_ARRAY_COUNT,
            max_stack_depth: MAX_WORD_LENGTH,
        }
    }
}

impl TraversalLimits {
    /// Replace the node ceiling.
    pub fn with_max_total_node_count(mut self, count: i32) -> Self {
        self.max_total_node_count = count;
        self
    }

    /// Replace the node array ceiling.
    pub fn with_max_node_array_count(mut self, count: i32) -> Self {
        self.max_node_array_count = count;
        self
    }

    /// Replace the stack depth ceiling.
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let limits = TraversalLimits::default();
        assert_eq!(limits.max_total_node_count, 100_000);
        assert_eq!(limits.max_node_array_count, 100_000);
        assert_eq!(limits.max_stack_depth, MAX_WORD_LENGTH);
    }

    #[test]
    fn builder_overrides() {
        let limits = TraversalLimits::default()
            .with_max_total_node_count(10)
            .with_max_node_array_count(3)
            .with_max_stack_depth(2);
        assert_eq!(limits.max_total_node_count, 10);
        assert_eq!(limits.max_node_array_count, 3);
        assert_eq!(limits.max_stack_depth, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let limits: TraversalLimits =
            serde_json::from_str(r#"{ "max_node_array_count": 7 }"#).unwrap();
        assert_eq!(limits.max_node_array_count, 7);
        assert_eq!(limits.max_total_node_count, DEFAULT_MAX_TOTAL_NODE_COUNT);
        assert_eq!(limits.max_stack_depth, MAX_WORD_LENGTH);
    }
}
