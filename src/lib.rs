//! # radix-map
//!
//! An ordered map keyed by byte strings, stored as a path-compressed radix
//! tree (PATRICIA-style trie).
//!
//! Chains of single-child nodes are collapsed into one edge labelled with the
//! concatenated bytes, and sibling edges are kept sorted by their leading
//! byte. Every traversal therefore yields keys in byte-lexicographic order
//! without sorting, and prefix-scoped operations (longest-prefix match,
//! subtree walks, subtree removal) cost time proportional to the key length
//! plus the size of the affected subtree.
//!
//! ## Example
//!
//! ```rust
//! use radix_map::RadixTree;
//!
//! let mut tree: RadixTree<u32> = RadixTree::new();
//! tree.insert(b"foo", 1);
//! tree.insert(b"foobar", 2);
//! tree.insert(b"zip", 3);
//!
//! assert_eq!(tree.get(b"foobar"), Some(&2));
//! assert_eq!(tree.longest_prefix(b"foob"), Some((&b"foo"[..], &1)));
//! assert_eq!(tree.remove_prefix(b"foo"), 2);
//! assert_eq!(tree.len(), 1);
//! ```

use std::collections::HashMap;
use std::mem;

mod iter;
mod node;
mod walk;

pub use iter::{Iter, Keys, Values};

use node::{common_prefix_len, Edge, Leaf, Node};

// =============================================================================
// RadixTree
// =============================================================================

/// A mutable radix tree mapping byte-string keys to values of type `V`.
///
/// The empty key is a valid key; its value lives on the root node.
#[derive(Clone)]
pub struct RadixTree<V> {
    root: Node<V>,
    size: usize,
}

impl<V> RadixTree<V> {
    pub fn new() -> Self {
        Self {
            root: Node::empty(),
            size: 0,
        }
    }

    /// Builds a tree holding every entry of `map`.
    ///
    /// Keys are inserted in the map's iteration order. If two keys of the map
    /// compare equal as bytes, which one wins is unspecified.
    pub fn from_map<K: AsRef<[u8]>, S>(map: HashMap<K, V, S>) -> Self {
        let tree: Self = map.into_iter().collect();
        tracing::debug!(entries = tree.len(), "built radix tree from map");
        tree
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every entry, leaving an empty root.
    pub fn clear(&mut self) {
        self.root = Node::empty();
        self.size = 0;
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<V> RadixTree<V> {
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find_node(key)?.leaf.as_ref().map(|leaf| &leaf.value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.find_node_mut(key)?
            .leaf
            .as_mut()
            .map(|leaf| &mut leaf.value)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Node whose path is exactly `key`, whether or not it carries a leaf.
    fn find_node(&self, key: &[u8]) -> Option<&Node<V>> {
        let mut node = &self.root;
        let mut search = key;
        while let Some(&byte) = search.first() {
            let child = node.child(byte)?;
            search = search.strip_prefix(child.prefix.as_slice())?;
            node = child;
        }
        Some(node)
    }

    fn find_node_mut(&mut self, key: &[u8]) -> Option<&mut Node<V>> {
        let mut node = &mut self.root;
        let mut search = key;
        while let Some(&byte) = search.first() {
            let child = node.child_mut(byte)?;
            search = search.strip_prefix(child.prefix.as_slice())?;
            node = child;
        }
        Some(node)
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl<V> RadixTree<V> {
    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// Updating an existing key never changes the shape of the tree.
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        let mut node = &mut self.root;
        let mut search = key;

        loop {
            let Some(&byte) = search.first() else {
                if let Some(leaf) = node.leaf.as_mut() {
                    return Some(mem::replace(&mut leaf.value, value));
                }
                node.leaf = Some(Leaf::new(key, value));
                self.size += 1;
                return None;
            };

            let idx = match node.find_edge(byte) {
                Ok(idx) => idx,
                Err(pos) => {
                    let child = Node::leaf_node(search, Leaf::new(key, value));
                    node.edges.insert(pos, Edge { label: byte, node: child });
                    self.size += 1;
                    return None;
                }
            };

            let label_len = node.edges[idx].node.prefix.len();
            let common = common_prefix_len(search, &node.edges[idx].node.prefix);
            if common == label_len {
                search = &search[common..];
                node = &mut node.edges[idx].node;
                continue;
            }

            // The key diverges inside the edge label (or ends inside it): put
            // an intermediate node at the divergence point.
            tracing::trace!(
                target: "radix_map::insert",
                common,
                label_len,
                "splitting edge"
            );
            let edge = &mut node.edges[idx];
            let mut split = Node::with_prefix(&search[..common]);
            let mut old = mem::replace(&mut edge.node, Node::empty());
            old.prefix.drain(..common);
            split.add_child(old);

            let rest = &search[common..];
            let leaf = Leaf::new(key, value);
            if rest.is_empty() {
                split.leaf = Some(leaf);
            } else {
                split.add_child(Node::leaf_node(rest, leaf));
            }
            edge.node = split;
            self.size += 1;
            return None;
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        let leaf = Self::remove_leaf(&mut self.root, key)?;
        self.size -= 1;
        Some(leaf.value)
    }

    /// Removes every key starting with `prefix` and returns how many were
    /// removed. An empty prefix clears the tree.
    pub fn remove_prefix(&mut self, prefix: &[u8]) -> usize {
        if prefix.is_empty() {
            let removed = self.size;
            self.clear();
            tracing::trace!(target: "radix_map::remove_prefix", removed, "cleared tree");
            return removed;
        }
        let removed = Self::remove_subtree(&mut self.root, prefix);
        self.size -= removed;
        removed
    }

    /// Takes the leaf at `search` below `node`, compacting every node on the
    /// way back up. `node` itself is left as is, so the root is never merged.
    fn remove_leaf(node: &mut Node<V>, search: &[u8]) -> Option<Leaf<V>> {
        let Some(&byte) = search.first() else {
            return node.leaf.take();
        };
        let idx = node.find_edge(byte).ok()?;
        let child = &mut node.edges[idx].node;
        let rest = search.strip_prefix(child.prefix.as_slice())?;
        let leaf = Self::remove_leaf(child, rest)?;
        node.compact_child(idx);
        Some(leaf)
    }

    /// `prefix` must be non-empty.
    fn remove_subtree(node: &mut Node<V>, prefix: &[u8]) -> usize {
        let Ok(idx) = node.find_edge(prefix[0]) else {
            return 0;
        };
        let child = &mut node.edges[idx].node;
        match prefix.strip_prefix(child.prefix.as_slice()) {
            Some(rest) if !rest.is_empty() => {
                let removed = Self::remove_subtree(child, rest);
                if removed > 0 {
                    node.compact_child(idx);
                }
                removed
            }
            Some(_) => Self::detach_child(node, idx),
            // The prefix ends inside this edge's label.
            None if child.prefix.starts_with(prefix) => Self::detach_child(node, idx),
            None => 0,
        }
    }

    fn detach_child(node: &mut Node<V>, idx: usize) -> usize {
        let edge = node.edges.remove(idx);
        let removed = edge.node.leaf_count();
        tracing::trace!(
            target: "radix_map::remove_prefix",
            removed,
            "detached subtree"
        );
        removed
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<V: Clone> RadixTree<V> {
    /// Copies every entry into a `HashMap`.
    pub fn to_map(&self) -> HashMap<Vec<u8>, V> {
        self.iter()
            .map(|(key, value)| (key.to_vec(), value.clone()))
            .collect()
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}
