//! The in-order traversal engine.
//!
//! In-order position is the DFS order induced by dense alphabet indices; a
//! node is *visited* exactly when it holds a value. Successor and
//! predecessor walk the node graph directly, so no auxiliary sorted
//! structure exists to keep in sync with mutations. The root doubles as the
//! end sentinel: a walk that exhausts the tree lands on the root.

use crate::node::NodeId;
use crate::Trie;

impl<S, V, C> Trie<S, V, C> {
    /// Next value-bearing node after `from` in alphabet order, starting the
    /// child scan at `start`. Returns the root sentinel when no such node
    /// exists.
    pub(crate) fn successor(&self, from: NodeId, start: u32) -> NodeId {
        let mut node = from;
        let mut start = start;
        loop {
            if let Some(child) = self.first_child_from(node, start) {
                if self.arena.node(child).value.is_some() {
                    return child;
                }
                // Valueless interior node: its subtree holds the next value.
                node = child;
                start = 0;
                continue;
            }
            let n = self.arena.node(node);
            if n.parent == NodeId::NONE {
                return NodeId::ROOT;
            }
            // Resume the parent's scan just past our own edge.
            start = n.symbol + 1;
            node = n.parent;
        }
    }

    /// Mirror of [`Trie::successor`]: previous value-bearing node before
    /// `from`, scanning child edges below the exclusive bound `end`.
    pub(crate) fn predecessor(&self, from: NodeId, end: u32) -> NodeId {
        let mut node = from;
        let mut end = end;
        loop {
            if let Some(child) = self.last_child_before(node, end) {
                if self.arena.node(child).value.is_some() {
                    return child;
                }
                // Descend into the rightmost subtree.
                node = child;
                end = self.width();
                continue;
            }
            let n = self.arena.node(node);
            if n.parent == NodeId::NONE {
                return NodeId::ROOT;
            }
            end = n.symbol;
            node = n.parent;
        }
    }

    /// First live child of `id` at edge `start` or above.
    fn first_child_from(&self, id: NodeId, start: u32) -> Option<NodeId> {
        let children = self.arena.node(id).children.as_ref()?;
        children
            .iter()
            .skip(start as usize)
            .copied()
            .find(|&child| child != NodeId::NONE)
    }

    /// Last live child of `id` strictly below the edge bound `end`.
    fn last_child_before(&self, id: NodeId, end: u32) -> Option<NodeId> {
        let children = self.arena.node(id).children.as_ref()?;
        children
            .iter()
            .take(end as usize)
            .rev()
            .copied()
            .find(|&child| child != NodeId::NONE)
    }

    /// Rebuilds a node's key by collecting edge symbols up to the root.
    pub(crate) fn key_of_node(&self, id: NodeId) -> Vec<S>
    where
        S: Clone,
    {
        let mut key = Vec::new();
        let mut node = id;
        loop {
            let n = self.arena.node(node);
            if n.parent == NodeId::NONE {
                break;
            }
            if let Some(symbol) = self.alphabet.symbols().get(n.symbol as usize) {
                key.push(symbol.clone());
            }
            node = n.parent;
        }
        key.reverse();
        key
    }
}
