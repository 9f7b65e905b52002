// Reading cursor and the bounded stack of saved cursors.

use lexitrie_core::{DictPos, NOT_A_DICT_POS};

/// The traversal cursor.
///
/// `total_node_count` and `node_array_count` accumulate over every array of
/// the current level, forward-link continuations included, and restart when
/// the cursor moves to a children array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingState {
    pub pos: DictPos,
    /// Nodes left in the current array, the current node included.
    pub node_count: i32,
    pub total_node_count: i32,
    pub node_array_count: i32,
    pub pos_of_last_forward_link_field: DictPos,
    pub pos_of_last_node_array_head: DictPos,
}

impl Default for ReadingState {
    fn default() -> Self {
        Self {
            pos: NOT_A_DICT_POS,
            node_count: 0,
            total_node_count: 0,
            node_array_count: 0,
            pos_of_last_forward_link_field: NOT_A_DICT_POS,
            pos_of_last_node_array_head: NOT_A_DICT_POS,
        }
    }
}

/// Saved cursors, one per descent, with a fixed maximum depth.
#[derive(Debug, Clone)]
pub struct ReadingStateStack {
    states: Vec<ReadingState>,
    max_depth: usize,
}

impl ReadingStateStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            states: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Save a cursor. Returns `false` and leaves the stack untouched when it
    /// is already at its maximum depth.
    #[must_use]
    pub fn push(&mut self, state: ReadingState) -> bool {
        if self.states.len() >= self.max_depth {
            return false;
        }
        self.states.push(state);
        true
    }

    pub fn pop(&mut self) -> Option<ReadingState> {
        self.states.pop()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(pos: DictPos) -> ReadingState {
        ReadingState {
            pos,
            ..Default::default()
        }
    }

    #[test]
    fn push_pop_lifo() {
        let mut stack = ReadingStateStack::new(4);
        assert!(stack.push(state_at(1)));
        assert!(stack.push(state_at(2)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.pop().map(|s| s.pos), Some(2));
        assert_eq!(stack.pop().map(|s| s.pos), Some(1));
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn push_beyond_max_depth_fails() {
        let mut stack = ReadingStateStack::new(2);
        assert!(stack.push(state_at(1)));
        assert!(stack.push(state_at(2)));
        assert!(!stack.push(state_at(3)));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.max_depth(), 2);
    }

    #[test]
    fn zero_depth_rejects_everything() {
        let mut stack = ReadingStateStack::new(0);
        assert!(!stack.push(ReadingState::default()));
    }

    #[test]
    fn default_state_is_at_end() {
        let state = ReadingState::default();
        assert_eq!(state.pos, NOT_A_DICT_POS);
        assert_eq!(state.pos_of_last_forward_link_field, NOT_A_DICT_POS);
    }
}
