// Traversal driver over dynamic patricia trie node arrays.

use lexitrie_core::{DictPos, NOT_A_DICT_POS, TraversalLimits};
use lexitrie_format::node_array::is_valid_forward_link;
use lexitrie_format::{PtNodeParams, TrieNodeReader};
use tracing::{debug, warn};

use crate::TraversalError;
use crate::listener::TraversingEventListener;
use crate::state::{ReadingState, ReadingStateStack};

/// Cursor-driven reader of a dynamic patricia trie.
///
/// The helper owns one [`ReadingState`] and a bounded stack of saved states.
/// Cursor operations never fail loudly: a corrupt structure records a
/// [`TraversalError`], moves the cursor to [`NOT_A_DICT_POS`] and leaves the
/// error queryable through [`is_error`](Self::is_error) and
/// [`error`](Self::error). Only the first error of a walk is kept.
#[derive(Debug)]
pub struct ReadingHelper<R> {
    reader: R,
    limits: TraversalLimits,
    state: ReadingState,
    stack: ReadingStateStack,
    node: PtNodeParams,
    error: Option<TraversalError>,
}

impl<R: TrieNodeReader> ReadingHelper<R> {
    /// Create a helper with the default ceilings.
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, TraversalLimits::default())
    }

    pub fn with_limits(reader: R, limits: TraversalLimits) -> Self {
        Self {
            reader,
            limits,
            state: ReadingState::default(),
            stack: ReadingStateStack::new(limits.max_stack_depth),
            node: PtNodeParams::default(),
            error: None,
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state.pos == NOT_A_DICT_POS
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&TraversalError> {
        self.error.as_ref()
    }

    /// Current cursor position.
    #[inline]
    pub fn pos(&self) -> DictPos {
        self.state.pos
    }

    /// The node under the cursor. Stale once [`is_end`](Self::is_end) is true.
    #[inline]
    pub fn node(&self) -> &PtNodeParams {
        &self.node
    }

    pub fn pos_of_last_forward_link_field(&self) -> DictPos {
        self.state.pos_of_last_forward_link_field
    }

    pub fn pos_of_last_node_array_head(&self) -> DictPos {
        self.state.pos_of_last_node_array_head
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn limits(&self) -> &TraversalLimits {
        &self.limits
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Start reading the node array at `pos`.
    pub fn init_with_node_array_pos(&mut self, pos: DictPos) {
        self.reset();
        if !self.check_init_pos(pos) {
            return;
        }
        self.state.pos = pos;
        self.next_node_array();
        if !self.is_end() {
            self.fetch_node_info();
        }
    }

    /// Start reading at the single PtNode at `pos`, as if it were a one-node array.
    pub fn init_with_node_pos(&mut self, pos: DictPos) {
        self.reset();
        if !self.check_init_pos(pos) {
            return;
        }
        self.state = ReadingState {
            pos,
            node_count: 1,
            total_node_count: 1,
            node_array_count: 1,
            ..Default::default()
        };
        self.fetch_node_info();
    }

    /// Move to the next sibling, following forward links past the end of the
    /// current array. Ends the cursor when the level is exhausted.
    pub fn read_next_sibling_node(&mut self) {
        if self.is_end() {
            return;
        }
        self.state.node_count -= 1;
        self.state.pos = self.node.sibling_pos;
        if self.state.node_count <= 0 {
            // All nodes of the current array have been read.
            self.follow_forward_link();
        }
        if !self.is_end() {
            self.fetch_node_info();
        }
    }

    /// Move to the first node of the current node's children array.
    pub fn read_child_node(&mut self) {
        if self.is_end() {
            return;
        }
        if !self.node.has_children() {
            self.state.pos = NOT_A_DICT_POS;
            return;
        }
        self.state.total_node_count = 0;
        self.state.node_array_count = 0;
        self.state.pos = self.node.children_pos;
        self.state.pos_of_last_forward_link_field = NOT_A_DICT_POS;
        self.next_node_array();
        if !self.is_end() {
            self.fetch_node_info();
        }
    }

    /// Move to the current node's parent, viewed as a one-node array.
    pub fn read_parent_node(&mut self) {
        if self.is_end() {
            return;
        }
        if self.node.parent_pos == NOT_A_DICT_POS {
            self.state.pos = NOT_A_DICT_POS;
            return;
        }
        self.state = ReadingState {
            pos: self.node.parent_pos,
            node_count: 1,
            total_node_count: 1,
            node_array_count: 1,
            ..Default::default()
        };
        self.fetch_node_info();
    }

    /// Walk every node reachable from the cursor in postorder depth-first order.
    ///
    /// Fires `on_descend` when entering the root level and each children
    /// array, `on_visiting_node` for a node once all of its children are done,
    /// and `on_ascend` when a level is exhausted, the root level included.
    /// A final `on_ascend` closes the walk, so a complete walk fires one
    /// ascend per pushed descend plus the root pair.
    ///
    /// Returns `true` if the walk completed. Returns `false` as soon as the
    /// listener asks to stop or an error is recorded; use
    /// [`is_error`](Self::is_error) to tell the two apart.
    pub fn traverse_all_nodes_in_postorder_depth_first<L>(&mut self, listener: &mut L) -> bool
    where
        L: TraversingEventListener + ?Sized,
    {
        debug!(pos = self.state.pos, "starting postorder traversal");
        let mut already_visited_children = false;
        // Descend from the root to the root node array.
        if !listener.on_descend() {
            return false;
        }
        while !self.is_end() {
            if !already_visited_children {
                if !self.node.has_children() {
                    already_visited_children = true;
                    continue;
                }
                if !listener.on_descend() || !self.push_reading_state_to_stack() {
                    return false;
                }
                self.read_child_node();
                if self.is_error() {
                    return false;
                }
                if self.is_end() {
                    // Empty children level.
                    if !self.ascend_to_parent(listener) {
                        return false;
                    }
                    already_visited_children = true;
                }
            } else {
                if !listener.on_visiting_node(&self.node) {
                    return false;
                }
                self.read_next_sibling_node();
                if self.is_error() {
                    return false;
                }
                if !self.is_end() {
                    already_visited_children = false;
                } else {
                    // Popping the root level leaves the cursor at the end.
                    if !self.ascend_to_parent(listener) {
                        return false;
                    }
                    already_visited_children = true;
                }
            }
        }
        // Ascend from the root node array to the root.
        if !listener.on_ascend() {
            return false;
        }
        debug!(error = self.is_error(), "finished postorder traversal");
        !self.is_error()
    }

    fn ascend_to_parent<L>(&mut self, listener: &mut L) -> bool
    where
        L: TraversingEventListener + ?Sized,
    {
        if !listener.on_ascend() {
            return false;
        }
        self.pop_reading_state_from_stack();
        !self.is_error()
    }

    /// Read the header of the node array at the cursor and move to its first
    /// node. Empty arrays are skipped through their forward links.
    ///
    /// Nodes and arrays are counted here; exceeding a ceiling ends the walk
    /// with an error, which bounds forward-link cycles and falsified counts.
    fn next_node_array(&mut self) {
        loop {
            let head = self.state.pos;
            self.state.pos_of_last_node_array_head = head;
            let header = match self.reader.read_node_array_header(head) {
                Ok(header) => header,
                Err(e) => return self.flag_error(e.into()),
            };
            self.state.pos = header.first_node_pos;
            self.state.node_count = header.node_count;
            self.state.total_node_count =
                self.state.total_node_count.saturating_add(header.node_count);
            self.state.node_array_count = self.state.node_array_count.saturating_add(1);

            if let Some(error) = self.check_ceilings(head) {
                return self.flag_error(error);
            }
            if self.state.node_count != 0 {
                return;
            }
            // Empty node array. Try the forward link.
            if !self.move_to_forward_link_target() {
                return;
            }
        }
    }

    fn check_ceilings(&self, head: DictPos) -> Option<TraversalError> {
        let state = &self.state;
        if state.node_count < 0 {
            Some(TraversalError::NegativeNodeCount {
                pos: head,
                count: state.node_count,
            })
        } else if state.total_node_count > self.limits.max_total_node_count {
            Some(TraversalError::NodeCountOverflow {
                count: state.total_node_count,
                limit: self.limits.max_total_node_count,
            })
        } else if state.node_array_count > self.limits.max_node_array_count {
            Some(TraversalError::NodeArrayCountOverflow {
                count: state.node_array_count,
                limit: self.limits.max_node_array_count,
            })
        } else {
            None
        }
    }

    /// Follow the forward link at the cursor and read the linked array, if any.
    fn follow_forward_link(&mut self) {
        if self.move_to_forward_link_target() {
            self.next_node_array();
        }
    }

    /// Move the cursor from a forward-link field to the array it links to.
    /// Returns `false` with the cursor ended when there is no link.
    fn move_to_forward_link_target(&mut self) -> bool {
        let field_pos = self.state.pos;
        let offset = match self.reader.read_forward_link(field_pos) {
            Ok(offset) => offset,
            Err(e) => {
                self.flag_error(e.into());
                return false;
            }
        };
        self.state.pos_of_last_forward_link_field = field_pos;
        if is_valid_forward_link(offset) {
            self.state.pos = field_pos.saturating_add(offset);
            true
        } else {
            // All node arrays of this level have been read.
            self.state.pos = NOT_A_DICT_POS;
            false
        }
    }

    fn fetch_node_info(&mut self) {
        match self.reader.fetch_node_info(self.state.pos) {
            Ok(node) => self.node = node,
            Err(e) => self.flag_error(e.into()),
        }
    }

    fn push_reading_state_to_stack(&mut self) -> bool {
        if self.stack.push(self.state) {
            return true;
        }
        self.flag_error(TraversalError::StackOverflow {
            limit: self.stack.max_depth(),
        });
        false
    }

    fn pop_reading_state_from_stack(&mut self) {
        match self.stack.pop() {
            Some(state) => {
                self.state = state;
                if !self.is_end() {
                    self.fetch_node_info();
                }
            }
            None => self.state.pos = NOT_A_DICT_POS,
        }
    }

    fn check_init_pos(&mut self, pos: DictPos) -> bool {
        let tail = self.reader.tail_position();
        if usize::try_from(pos).is_ok_and(|p| p < tail) {
            return true;
        }
        self.flag_error(TraversalError::InvalidPosition { pos, tail });
        false
    }

    fn reset(&mut self) {
        self.error = None;
        self.stack.clear();
        self.state = ReadingState::default();
        self.node = PtNodeParams::default();
    }

    fn flag_error(&mut self, error: TraversalError) {
        warn!(
            %error,
            pos = self.state.pos,
            node_count = self.state.node_count,
            total_node_count = self.state.total_node_count,
            node_array_count = self.state.node_array_count,
            "invalid dictionary"
        );
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.state.pos = NOT_A_DICT_POS;
    }
}
