use crate::alphabet::SymbolOrder;
use crate::iter::Cursor;
use crate::node::NodeId;
use crate::{Trie, TrieError};

impl<S, V, C: SymbolOrder<S>> Trie<S, V, C> {
    /// Returns a mutable reference to the value under `key`, inserting
    /// `V::default()` (and the key path) when absent.
    ///
    /// Every symbol is resolved against the alphabet before any node is
    /// created, so a [`TrieError::SymbolNotInAlphabet`] failure leaves the
    /// trie untouched.
    pub fn insert_or_get(&mut self, key: &[S]) -> Result<&mut V, TrieError>
    where
        V: Default,
    {
        let node = self.insert_path(key)?;
        Ok(self
            .arena
            .node_mut(node)
            .value
            .get_or_insert_with(V::default))
    }

    /// Stores `value` under `key`, returning the previous value if one was
    /// present. Same path-creation and validation rules as
    /// [`Trie::insert_or_get`].
    pub fn insert(&mut self, key: &[S], value: V) -> Result<Option<V>, TrieError> {
        let node = self.insert_path(key)?;
        Ok(self.arena.node_mut(node).value.replace(value))
    }

    fn insert_path(&mut self, key: &[S]) -> Result<NodeId, TrieError> {
        let mut indices = Vec::with_capacity(key.len());
        for symbol in key {
            indices.push(
                self.alphabet
                    .index_of(symbol)
                    .ok_or(TrieError::SymbolNotInAlphabet)?,
            );
        }
        let mut node = NodeId::ROOT;
        for index in indices {
            node = self.arena.child_or_insert(node, index);
        }
        Ok(node)
    }

    /// Removes the value under `key`. Returns true iff a value was present.
    ///
    /// Ancestors left without a value and without children are pruned
    /// eagerly, walking upward until an ancestor is still needed.
    pub fn remove(&mut self, key: &[S]) -> bool {
        let Some(node) = self.locate(key) else {
            return false;
        };
        if self.arena.node_mut(node).value.take().is_none() {
            return false;
        }
        self.prune_upward(node);
        true
    }

    /// Removes the entry at `cursor`, returning a cursor to its successor.
    ///
    /// The successor is captured before pruning, so forward erase-while-
    /// iterating is safe. Pruning starts at the cursor's node directly; the
    /// key path is not re-traversed. A cursor whose node was already
    /// removed fails with [`TrieError::InvalidIteratorOperation`].
    pub fn remove_at(&mut self, cursor: Cursor) -> Result<Cursor, TrieError> {
        if self.arena.get(cursor.node).is_none() {
            return Err(TrieError::InvalidIteratorOperation);
        }
        let next = self.successor(cursor.node, 0);
        self.arena.node_mut(cursor.node).value = None;
        self.prune_upward(cursor.node);
        Ok(Cursor { node: next })
    }

    /// Removes every entry in `[first, last)`, returning `last`.
    ///
    /// Fails with [`TrieError::InvalidIteratorOperation`] when either
    /// cursor is stale or the walk reaches the end sentinel without meeting
    /// `last`.
    pub fn remove_range(&mut self, first: Cursor, last: Cursor) -> Result<Cursor, TrieError> {
        if self.arena.get(last.node).is_none() {
            return Err(TrieError::InvalidIteratorOperation);
        }
        let mut cursor = first;
        while cursor != last {
            if cursor.node == NodeId::ROOT {
                return Err(TrieError::InvalidIteratorOperation);
            }
            cursor = self.remove_at(cursor)?;
        }
        Ok(cursor)
    }

    /// Walks from `start` toward the root, pruning each just-departed child
    /// slot, and stops at the first ancestor that is still needed.
    pub(crate) fn prune_upward(&mut self, start: NodeId) {
        let mut node = start;
        loop {
            let (parent, symbol) = {
                let n = self.arena.node(node);
                (n.parent, n.symbol)
            };
            if parent == NodeId::NONE {
                break;
            }
            if !self.arena.prune_child(parent, symbol) {
                break;
            }
            node = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Trie, TrieError};

    const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

    fn trie() -> Trie<u8, i32> {
        Trie::new(ALPHA.iter().copied()).unwrap()
    }

    #[test]
    fn insert_then_retrieve() {
        let mut t = trie();
        *t.insert_or_get(b"panda").unwrap() = 1;
        assert_eq!(*t.insert_or_get(b"panda").unwrap(), 1);
    }

    #[test]
    fn multiple_keys() {
        let mut t = trie();
        *t.insert_or_get(b"panda").unwrap() = 1;
        *t.insert_or_get(b"polar").unwrap() = 2;
        *t.insert_or_get(b"koala").unwrap() = 3;
        *t.insert_or_get(b"grizzly").unwrap() = 4;

        assert_eq!(t.get(b"panda"), Some(&1));
        assert_eq!(t.get(b"polar"), Some(&2));
        assert_eq!(t.get(b"koala"), Some(&3));
        assert_eq!(t.get(b"grizzly"), Some(&4));
    }

    #[test]
    fn a_key_and_all_its_prefixes() {
        let mut t = trie();
        *t.insert_or_get(b"p").unwrap() = 1;
        *t.insert_or_get(b"po").unwrap() = 2;
        *t.insert_or_get(b"pol").unwrap() = 3;
        *t.insert_or_get(b"pola").unwrap() = 4;
        *t.insert_or_get(b"polar").unwrap() = 5;

        assert_eq!(t.get(b"p"), Some(&1));
        assert_eq!(t.get(b"po"), Some(&2));
        assert_eq!(t.get(b"pol"), Some(&3));
        assert_eq!(t.get(b"pola"), Some(&4));
        assert_eq!(t.get(b"polar"), Some(&5));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut t = trie();
        assert_eq!(t.insert(b"panda", 1).unwrap(), None);
        assert_eq!(t.insert(b"panda", 9).unwrap(), Some(1));
        assert_eq!(t.get(b"panda"), Some(&9));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn foreign_symbol_rejected_before_any_mutation() {
        let mut t = trie();
        assert_eq!(
            t.insert_or_get(b"pol_r").unwrap_err(),
            TrieError::SymbolNotInAlphabet
        );
        // Nothing was created, not even the valid "pol" prefix.
        assert!(t.find(b"p").is_none());
        assert!(t.is_empty());
    }

    #[test]
    fn remove_shared_prefix_keys_one_by_one() {
        let mut t = trie();
        *t.insert_or_get(b"polar").unwrap() = 5;
        *t.insert_or_get(b"polarize").unwrap() = 5;
        *t.insert_or_get(b"polarity").unwrap() = 5;
        assert_eq!(t.len(), 3);

        assert!(t.remove(b"polar"));
        assert_eq!(t.len(), 2);
        assert!(!t.contains(b"polar"));
        assert!(t.contains(b"polarize"));
        assert!(t.contains(b"polarity"));

        assert!(t.remove(b"polarize"));
        assert_eq!(t.len(), 1);
        assert!(t.contains(b"polarity"));

        assert!(t.remove(b"polarity"));
        assert_eq!(t.len(), 0);
        assert!(!t.contains(b"polarity"));
    }

    #[test]
    fn remove_leaves_prefix_entries_intact() {
        let mut t = trie();
        for (i, key) in [&b"p"[..], b"po", b"pol", b"pola", b"polar"]
            .iter()
            .enumerate()
        {
            *t.insert_or_get(key).unwrap() = i as i32 + 1;
        }

        assert_eq!(t.len(), 5);
        assert!(t.remove(b"polar"));
        assert_eq!(t.len(), 4);
        assert!(t.contains(b"p"));
        assert!(t.contains(b"po"));
        assert!(t.contains(b"pol"));
        assert!(t.contains(b"pola"));
        assert!(!t.contains(b"polar"));
    }

    #[test]
    fn remove_prefix_leaves_extension_intact() {
        let mut t = trie();
        *t.insert_or_get(b"po").unwrap() = 1;
        *t.insert_or_get(b"polar").unwrap() = 2;

        assert!(t.remove(b"po"));
        assert!(!t.contains(b"po"));
        assert_eq!(t.get(b"polar"), Some(&2));
    }

    #[test]
    fn remove_reports_misses() {
        let mut t = trie();
        *t.insert_or_get(b"polar").unwrap() = 5;
        // No path at all.
        assert!(!t.remove(b"koala"));
        // Path exists but holds no value.
        assert!(!t.remove(b"pol"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn insert_and_remove_in_scrambled_orders() {
        let keys: [&[u8]; 7] = [
            b"polar",
            b"poland",
            b"grizzly",
            b"polarize",
            b"koala",
            b"panda",
            b"polarity",
        ];
        // A couple of fixed permutations stand in for a random shuffle.
        for rotation in 0..keys.len() {
            let mut t = trie();
            for key in keys {
                *t.insert_or_get(key).unwrap() = 5;
            }
            assert_eq!(t.len(), keys.len());

            for i in 0..keys.len() {
                assert!(t.remove(keys[(i + rotation) % keys.len()]));
            }
            assert_eq!(t.len(), 0);
            for key in keys {
                assert!(!t.contains(key));
            }
        }
    }

    #[test]
    fn case_insensitive_alphabet() {
        use crate::SymbolOrder;
        use std::cmp::Ordering;

        struct CaseFold;
        impl SymbolOrder<u8> for CaseFold {
            fn cmp(&self, a: &u8, b: &u8) -> Ordering {
                a.to_ascii_uppercase().cmp(&b.to_ascii_uppercase())
            }
        }

        let mut t: Trie<u8, i32, CaseFold> =
            Trie::with_order(ALPHA.iter().copied(), CaseFold).unwrap();
        *t.insert_or_get(b"pAnDa").unwrap() = 1;
        *t.insert_or_get(b"pOLAR").unwrap() = 2;
        *t.insert_or_get(b"Koala").unwrap() = 3;
        *t.insert_or_get(b"grizzly").unwrap() = 4;

        assert_eq!(t.get(b"PaNdA"), Some(&1));
        assert_eq!(t.get(b"pOLAR"), Some(&2));
        assert_eq!(t.get(b"koala"), Some(&3));
        assert_eq!(t.get(b"GRIZZLY"), Some(&4));
    }

    #[test]
    fn empty_key_lives_on_the_root() {
        let mut t = trie();
        *t.insert_or_get(b"").unwrap() = 1;
        assert_eq!(t.len(), 1);
        assert!(t.contains(b""));
        assert_eq!(t.get(b""), Some(&1));

        assert!(t.remove(b""));
        assert!(t.is_empty());
    }
}
