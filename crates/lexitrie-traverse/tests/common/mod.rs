// Fixture writer for dynamic patricia trie layouts.
//
// Lays out node arrays depth first: an array, then the children arrays of
// its nodes. Children offsets are patched once the children are placed.

#![allow(dead_code)]

use lexitrie_core::DictPos;
use lexitrie_format::node::{FLAG_HAS_MULTIPLE_CHARS, FLAG_IS_NOT_MOVED, FLAG_IS_TERMINAL};

pub struct Node {
    pub word: &'static str,
    pub terminal: bool,
    pub children: Vec<Node>,
}

pub fn leaf(word: &'static str) -> Node {
    Node {
        word,
        terminal: true,
        children: Vec::new(),
    }
}

pub fn inner(word: &'static str, children: Vec<Node>) -> Node {
    Node {
        word,
        terminal: false,
        children,
    }
}

/// Placement of one written node.
#[derive(Debug, Clone, Copy)]
pub struct Placed {
    pub head: DictPos,
    pub children_field: DictPos,
}

/// Placement of one written node array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayLayout {
    pub head: DictPos,
    pub link_field: DictPos,
}

#[derive(Default)]
pub struct TrieWriter {
    pub buf: Vec<u8>,
    base: usize,
    placed: Vec<(&'static str, Placed)>,
}

impl TrieWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose first byte sits at logical position `base`, for
    /// building additional-segment content.
    pub fn with_base(base: usize) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn pos(&self) -> DictPos {
        (self.base + self.buf.len()) as DictPos
    }

    pub fn head(&self, word: &str) -> DictPos {
        self.placed(word).head
    }

    pub fn placed(&self, word: &str) -> Placed {
        self.placed
            .iter()
            .find(|(w, _)| *w == word)
            .map(|(_, p)| *p)
            .unwrap_or_else(|| panic!("no node {word}"))
    }

    pub fn write_array_size(&mut self, count: usize) {
        if count < 0x80 {
            self.buf.push(count as u8);
        } else {
            assert!(count <= 0x7FFF);
            self.buf.push(0x80 | (count >> 8) as u8);
            self.buf.push(count as u8);
        }
    }

    pub fn write_s24(&mut self, value: i32) {
        let bytes = encode_s24(value);
        self.buf.extend_from_slice(&bytes);
    }

    pub fn patch_s24(&mut self, at: DictPos, value: i32) {
        let idx = at as usize - self.base;
        self.buf[idx..idx + 3].copy_from_slice(&encode_s24(value));
    }

    /// Point the children field of `word` at `target`.
    pub fn set_children(&mut self, word: &str, target: DictPos) {
        let field = self.placed(word).children_field;
        self.patch_s24(field, target - field);
    }

    pub fn write_forward_link(&mut self, target: Option<DictPos>) -> DictPos {
        let field = self.pos();
        self.write_s24(target.map_or(0, |t| t - field));
        field
    }

    pub fn write_node(&mut self, node: &Node, parent: Option<DictPos>) -> Placed {
        let head = self.pos();
        let multi = node.word.chars().count() > 1;
        let mut flags = FLAG_IS_NOT_MOVED;
        if node.terminal {
            flags |= FLAG_IS_TERMINAL;
        }
        if multi {
            flags |= FLAG_HAS_MULTIPLE_CHARS;
        }
        self.buf.push(flags);
        self.write_s24(parent.map_or(0, |p| p - head));
        for ch in node.word.chars() {
            let cp = ch as u32;
            if (0x20..=0xFF).contains(&cp) {
                self.buf.push(cp as u8);
            } else {
                self.buf.extend_from_slice(&cp.to_be_bytes()[1..]);
            }
        }
        if multi {
            self.buf.push(0x1F);
        }
        if node.terminal {
            self.buf.push(100);
        }
        let children_field = self.pos();
        self.write_s24(0);
        let placed = Placed {
            head,
            children_field,
        };
        self.placed.push((node.word, placed));
        placed
    }

    /// Write an array and, after it, all descendant arrays.
    pub fn write_array(&mut self, nodes: &[Node], parent: Option<DictPos>) -> DictPos {
        self.write_array_with_link(nodes, parent, None).head
    }

    pub fn write_array_with_link(
        &mut self,
        nodes: &[Node],
        parent: Option<DictPos>,
        link: Option<DictPos>,
    ) -> ArrayLayout {
        let head = self.pos();
        self.write_array_size(nodes.len());
        let placed: Vec<Placed> = nodes.iter().map(|n| self.write_node(n, parent)).collect();
        let link_field = self.write_forward_link(link);
        for (node, p) in nodes.iter().zip(placed) {
            if !node.children.is_empty() {
                let child = self.write_array(&node.children, Some(p.head));
                self.patch_s24(p.children_field, child - p.children_field);
            }
        }
        ArrayLayout { head, link_field }
    }

    /// Write an array header claiming `count` nodes with no nodes behind it.
    pub fn write_empty_array(&mut self, count: usize, link: Option<DictPos>) -> ArrayLayout {
        let head = self.pos();
        self.write_array_size(count);
        let link_field = self.write_forward_link(link);
        ArrayLayout { head, link_field }
    }
}

pub fn encode_s24(value: i32) -> [u8; 3] {
    let magnitude = value.unsigned_abs();
    assert!(magnitude <= 0x7F_FFFF, "offset {value} does not fit in s24");
    let mut bytes = [(magnitude >> 16) as u8, (magnitude >> 8) as u8, magnitude as u8];
    if value < 0 {
        bytes[0] |= 0x80;
    }
    bytes
}
