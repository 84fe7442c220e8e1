//! A bidirectional, tombstone-skipping cursor over the leaf chain.
//!
//! Mirrors the reference implementation's `kvs_cursor_seek`/`first`/`last`/
//! `next`/`prev`: a cursor tracks a `(leaf, index)` position and silently
//! steps over tombstoned slots in whichever direction it is moving, so a
//! caller iterating `next()` until `!valid()` never observes a deleted key.

use crate::arena::Arena;
use crate::compact_arena::{NodeId, NULL_NODE};
use crate::tree::BTreeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Unpositioned,
    Valid { leaf: NodeId, index: usize },
    Exhausted,
}

/// A bidirectional cursor over the store's live entries, in key order.
pub struct Cursor<'a> {
    tree: &'a BTreeIndex,
    arena: &'a Arena,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tree: &'a BTreeIndex, arena: &'a Arena) -> Self {
        Cursor {
            tree,
            arena,
            position: Position::Unpositioned,
        }
    }

    /// Position at the first live entry, in ascending key order.
    pub fn first(&mut self) -> bool {
        self.position = Position::Valid {
            leaf: self.tree.first_leaf(),
            index: 0,
        };
        self.skip_tombstones_forward();
        self.valid()
    }

    /// Position at the last live entry, in ascending key order.
    pub fn last(&mut self) -> bool {
        let mut leaf_id = self.tree.first_leaf();
        loop {
            let leaf = match self.tree.leaf(leaf_id) {
                Some(l) => l,
                None => {
                    self.position = Position::Exhausted;
                    return false;
                }
            };
            if leaf.next == NULL_NODE {
                if leaf.keys.is_empty() {
                    self.position = Position::Exhausted;
                    return false;
                }
                let index = leaf.keys.len() - 1;
                self.position = Position::Valid { leaf: leaf_id, index };
                break;
            }
            leaf_id = leaf.next;
        }
        self.skip_tombstones_backward();
        self.valid()
    }

    /// Position at the smallest live key `>= target`.
    pub fn seek(&mut self, target: &[u8]) -> bool {
        let mut leaf_id = self.tree.first_leaf();
        loop {
            let leaf = match self.tree.leaf(leaf_id) {
                Some(l) => l,
                None => {
                    self.position = Position::Exhausted;
                    return false;
                }
            };
            let p = leaf.search(self.arena, target);
            if p < leaf.keys.len() {
                self.position = Position::Valid { leaf: leaf_id, index: p };
                self.skip_tombstones_forward();
                return self.valid();
            }
            if leaf.next == NULL_NODE {
                self.position = Position::Exhausted;
                return false;
            }
            leaf_id = leaf.next;
        }
    }

    /// True if the cursor currently names a live entry.
    pub fn valid(&self) -> bool {
        matches!(self.position, Position::Valid { .. })
    }

    /// The current entry's key, or `None` if the cursor is not positioned.
    pub fn key(&self) -> Option<&'a [u8]> {
        let (leaf, index) = self.current()?;
        let leaf = self.tree.leaf(leaf)?;
        Some(self.arena.get(leaf.keys[index]))
    }

    /// The current entry's value, or `None` if the cursor is not positioned.
    pub fn value(&self) -> Option<&'a [u8]> {
        let (leaf, index) = self.current()?;
        let leaf = self.tree.leaf(leaf)?;
        let entry_id = leaf.entries[index];
        let entry = self.tree.entry(entry_id)?;
        Some(self.arena.get(entry.value))
    }

    /// Advance to the next live entry. Returns `false` once exhausted.
    pub fn next(&mut self) -> bool {
        if let Position::Valid { leaf, index } = self.position {
            self.position = Position::Valid { leaf, index: index + 1 };
            self.skip_tombstones_forward();
        }
        self.valid()
    }

    /// Retreat to the previous live entry. Returns `false` once exhausted.
    pub fn prev(&mut self) -> bool {
        if let Position::Valid { leaf, index } = self.position {
            if index == 0 {
                let current_leaf = self.tree.leaf(leaf);
                let prev_leaf = current_leaf.map(|l| l.prev).unwrap_or(NULL_NODE);
                if prev_leaf == NULL_NODE {
                    self.position = Position::Exhausted;
                    return false;
                }
                let prev_len = self.tree.leaf(prev_leaf).map(|l| l.keys.len()).unwrap_or(0);
                if prev_len == 0 {
                    self.position = Position::Exhausted;
                    return false;
                }
                self.position = Position::Valid { leaf: prev_leaf, index: prev_len - 1 };
            } else {
                self.position = Position::Valid { leaf, index: index - 1 };
            }
            self.skip_tombstones_backward();
        }
        self.valid()
    }

    fn current(&self) -> Option<(NodeId, usize)> {
        match self.position {
            Position::Valid { leaf, index } => Some((leaf, index)),
            _ => None,
        }
    }

    fn is_tombstoned(&self, leaf: NodeId, index: usize) -> Option<bool> {
        let leaf = self.tree.leaf(leaf)?;
        let entry_id = *leaf.entries.get(index)?;
        let entry = self.tree.entry(entry_id)?;
        Some(entry.tombstone)
    }

    fn skip_tombstones_forward(&mut self) {
        loop {
            let (mut leaf, mut index) = match self.current() {
                Some(p) => p,
                None => return,
            };
            loop {
                let leaf_node = match self.tree.leaf(leaf) {
                    Some(l) => l,
                    None => {
                        self.position = Position::Exhausted;
                        return;
                    }
                };
                if index >= leaf_node.keys.len() {
                    let next = leaf_node.next;
                    if next == NULL_NODE {
                        self.position = Position::Exhausted;
                        return;
                    }
                    leaf = next;
                    index = 0;
                    continue;
                }
                break;
            }
            self.position = Position::Valid { leaf, index };
            match self.is_tombstoned(leaf, index) {
                Some(true) => {
                    self.position = Position::Valid { leaf, index: index + 1 };
                    continue;
                }
                _ => return,
            }
        }
    }

    fn skip_tombstones_backward(&mut self) {
        loop {
            let (leaf, index) = match self.current() {
                Some(p) => p,
                None => return,
            };
            let in_bounds = self
                .tree
                .leaf(leaf)
                .map(|l| index < l.keys.len())
                .unwrap_or(false);
            let needs_step_back = !in_bounds || self.is_tombstoned(leaf, index) == Some(true);
            if !needs_step_back {
                return;
            }
            if index == 0 {
                let prev_leaf = self.tree.leaf(leaf).map(|l| l.prev).unwrap_or(NULL_NODE);
                if prev_leaf == NULL_NODE {
                    self.position = Position::Exhausted;
                    return;
                }
                let prev_len = self.tree.leaf(prev_leaf).map(|l| l.keys.len()).unwrap_or(0);
                if prev_len == 0 {
                    self.position = Position::Exhausted;
                    return;
                }
                self.position = Position::Valid { leaf: prev_leaf, index: prev_len - 1 };
            } else {
                self.position = Position::Valid { leaf, index: index - 1 };
            }
        }
    }
}
