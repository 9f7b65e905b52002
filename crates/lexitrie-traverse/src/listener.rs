// Traversal event callbacks and stock listeners.

use lexitrie_core::DictPos;
use lexitrie_format::PtNodeParams;

/// Callbacks fired by [`ReadingHelper`](crate::ReadingHelper) during a walk.
///
/// Each callback returns `true` to continue. Returning `false` stops the walk
/// immediately; no further callback is fired and no error is recorded.
pub trait TraversingEventListener {
    /// The walk moves down into a node array.
    fn on_descend(&mut self) -> bool;

    /// The walk has finished a node array (and its continuations) and moves up.
    fn on_ascend(&mut self) -> bool;

    /// Called once per PtNode, after all of its children.
    fn on_visiting_node(&mut self, node: &PtNodeParams) -> bool;
}

/// A single recorded callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent {
    Descend,
    Ascend,
    /// A node visit, identified by the node's head position.
    Visit(DictPos),
}

/// Records every callback in order, optionally stopping after a fixed number.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    pub events: Vec<TraversalEvent>,
    stop_after: Option<usize>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose `n`-th callback returns `false`.
    pub fn stopping_after(n: usize) -> Self {
        Self {
            events: Vec::new(),
            stop_after: Some(n),
        }
    }

    /// Head positions of visited nodes, in visiting order.
    pub fn visited(&self) -> Vec<DictPos> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TraversalEvent::Visit(pos) => Some(*pos),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, event: TraversalEvent) -> bool {
        self.events.push(event);
        self.stop_after.is_none_or(|n| self.events.len() < n)
    }
}

impl TraversingEventListener for EventRecorder {
    fn on_descend(&mut self) -> bool {
        self.record(TraversalEvent::Descend)
    }

    fn on_ascend(&mut self) -> bool {
        self.record(TraversalEvent::Ascend)
    }

    fn on_visiting_node(&mut self, node: &PtNodeParams) -> bool {
        self.record(TraversalEvent::Visit(node.head_pos))
    }
}

/// Aggregate shape statistics of a trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrieStats {
    pub node_count: usize,
    pub terminal_count: usize,
    pub deleted_count: usize,
    /// Node array levels entered, the root level included.
    pub level_count: usize,
    pub max_depth: usize,
    depth: usize,
}

impl TraversingEventListener for TrieStats {
    fn on_descend(&mut self) -> bool {
        self.depth += 1;
        self.level_count += 1;
        self.max_depth = self.max_depth.max(self.depth);
        true
    }

    fn on_ascend(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        true
    }

    fn on_visiting_node(&mut self, node: &PtNodeParams) -> bool {
        self.node_count += 1;
        if node.is_deleted() {
            self.deleted_count += 1;
        } else if node.is_terminal() {
            self.terminal_count += 1;
        }
        true
    }
}
