//! Cursors and iteration.
//!
//! Both surfaces run on the successor/predecessor engine in `walk.rs`. A
//! [`Cursor`] is a detached handle resolved against the trie on every use;
//! [`Iter`] borrows the trie and walks it in order.

use crate::node::NodeId;
use crate::{NaturalOrder, Trie, TrieError};

/// A position in a trie: one node, value-bearing or not.
///
/// Cursors are plain copyable handles; they do not borrow the trie and are
/// resolved (and validated) by the container methods that consume them. A
/// cursor pointing at a node that has since been pruned is *stale*:
/// operations through it fail with [`TrieError::InvalidIteratorOperation`].
///
/// The cursor returned by [`Trie::end`] sits on the root, which serves as
/// the end sentinel and may itself store the empty key's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) node: NodeId,
}

impl<S, V, C> Trie<S, V, C> {
    /// Cursor to the first entry in alphabet order, or [`Trie::end`] when
    /// nothing is stored below the root.
    pub fn first(&self) -> Cursor {
        Cursor {
            node: self.successor(NodeId::ROOT, 0),
        }
    }

    /// Cursor to the last entry in alphabet order, or [`Trie::end`] when
    /// nothing is stored below the root.
    pub fn last(&self) -> Cursor {
        Cursor {
            node: self.predecessor(NodeId::ROOT, self.width()),
        }
    }

    /// The end sentinel: a cursor on the root.
    ///
    /// When the empty key is stored, this same position also carries its
    /// value: `first() == end()` with a readable value. The root's dual
    /// role is deliberate and not special-cased away.
    pub fn end(&self) -> Cursor {
        Cursor {
            node: NodeId::ROOT,
        }
    }

    /// Advances a cursor to the next entry in order.
    ///
    /// Advancing the end sentinel wraps around to the first entry, the
    /// mirror of [`Trie::prev_of`] on the sentinel yielding the last.
    pub fn next_of(&self, cursor: Cursor) -> Result<Cursor, TrieError> {
        if self.arena.get(cursor.node).is_none() {
            return Err(TrieError::InvalidIteratorOperation);
        }
        Ok(Cursor {
            node: self.successor(cursor.node, 0),
        })
    }

    /// Retreats a cursor to the previous entry in order.
    pub fn prev_of(&self, cursor: Cursor) -> Result<Cursor, TrieError> {
        if self.arena.get(cursor.node).is_none() {
            return Err(TrieError::InvalidIteratorOperation);
        }
        Ok(Cursor {
            node: self.predecessor(cursor.node, self.width()),
        })
    }

    /// Reconstructs the key at `cursor` by walking parent links to the
    /// root.
    pub fn key_of(&self, cursor: Cursor) -> Result<Vec<S>, TrieError>
    where
        S: Clone,
    {
        if self.arena.get(cursor.node).is_none() {
            return Err(TrieError::InvalidIteratorOperation);
        }
        Ok(self.key_of_node(cursor.node))
    }

    /// Returns the value at `cursor`.
    ///
    /// Fails with [`TrieError::InvalidIteratorOperation`] when the cursor
    /// is stale or its node holds no value (a valueless interior prefix, or
    /// the sentinel without an empty-key entry).
    pub fn value_of(&self, cursor: Cursor) -> Result<&V, TrieError> {
        self.arena
            .get(cursor.node)
            .and_then(|node| node.value.as_ref())
            .ok_or(TrieError::InvalidIteratorOperation)
    }

    /// Mutable variant of [`Trie::value_of`].
    pub fn value_of_mut(&mut self, cursor: Cursor) -> Result<&mut V, TrieError> {
        self.arena
            .get_mut(cursor.node)
            .and_then(|node| node.value.as_mut())
            .ok_or(TrieError::InvalidIteratorOperation)
    }

    /// Iterates entries in alphabet order as `(key, &value)` pairs.
    ///
    /// The iterator is double-ended; `rev()` yields the exact reverse
    /// sequence. An empty-key value stored on the root is not yielded,
    /// because the walk terminates on reaching the root sentinel (see
    /// [`Trie::end`]).
    pub fn iter(&self) -> Iter<'_, S, V, C> {
        Iter {
            trie: self,
            front: self.successor(NodeId::ROOT, 0),
            back: self.predecessor(NodeId::ROOT, self.width()),
            finished: false,
        }
    }

    /// Iterates keys in alphabet order.
    pub fn keys(&self) -> Keys<'_, S, V, C> {
        Keys { inner: self.iter() }
    }

    /// Iterates values in key order.
    pub fn values(&self) -> Values<'_, S, V, C> {
        Values { inner: self.iter() }
    }
}

/// Double-ended in-order iterator over a trie's entries.
pub struct Iter<'a, S, V, C = NaturalOrder> {
    trie: &'a Trie<S, V, C>,
    /// Next node to yield going forward; the root means exhausted.
    front: NodeId,
    /// Next node to yield going backward; the root means exhausted.
    back: NodeId,
    /// Set once the two ends meet.
    finished: bool,
}

impl<'a, S: Clone, V, C> Iterator for Iter<'a, S, V, C> {
    type Item = (Vec<S>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.front == NodeId::ROOT {
            return None;
        }
        let id = self.front;
        if id == self.back {
            self.finished = true;
        } else {
            self.front = self.trie.successor(id, 0);
        }
        let value = self.trie.arena.node(id).value.as_ref()?;
        Some((self.trie.key_of_node(id), value))
    }
}

impl<'a, S: Clone, V, C> DoubleEndedIterator for Iter<'a, S, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.finished || self.back == NodeId::ROOT {
            return None;
        }
        let id = self.back;
        if id == self.front {
            self.finished = true;
        } else {
            self.back = self.trie.predecessor(id, self.trie.width());
        }
        let value = self.trie.arena.node(id).value.as_ref()?;
        Some((self.trie.key_of_node(id), value))
    }
}

impl<'a, S: Clone, V, C> IntoIterator for &'a Trie<S, V, C> {
    type Item = (Vec<S>, &'a V);
    type IntoIter = Iter<'a, S, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over keys, in order.
pub struct Keys<'a, S, V, C = NaturalOrder> {
    inner: Iter<'a, S, V, C>,
}

impl<'a, S: Clone, V, C> Iterator for Keys<'a, S, V, C> {
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over values, in key order.
pub struct Values<'a, S, V, C = NaturalOrder> {
    inner: Iter<'a, S, V, C>,
}

impl<'a, S: Clone, V, C> Iterator for Values<'a, S, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}
