//! Ordered traversals: full walk, prefix walk, path walk, min/max and
//! longest-prefix search.
//!
//! Visitors receive `(key, value)` and return `true` to stop the traversal.
//! The stop signal is propagated through every level of recursion, so no
//! further node is visited once a visitor has asked to stop.

use crate::node::{Leaf, Node};
use crate::RadixTree;

/// Visits the subtree under `node` in key order. Returns `true` if the
/// visitor stopped the walk.
fn walk_node<V, F>(node: &Node<V>, f: &mut F) -> bool
where
    F: FnMut(&[u8], &V) -> bool,
{
    if let Some(leaf) = &node.leaf {
        let (key, value) = leaf.entry();
        if f(key, value) {
            return true;
        }
    }
    node.edges.iter().any(|edge| walk_node(&edge.node, &mut *f))
}

impl<V> RadixTree<V> {
    /// Smallest key and its value.
    pub fn minimum(&self) -> Option<(&[u8], &V)> {
        let mut node = &self.root;
        loop {
            if let Some(leaf) = &node.leaf {
                return Some(leaf.entry());
            }
            node = node.first_child()?;
        }
    }

    /// Largest key and its value.
    pub fn maximum(&self) -> Option<(&[u8], &V)> {
        let mut node = &self.root;
        while let Some(child) = node.last_child() {
            node = child;
        }
        node.leaf.as_ref().map(Leaf::entry)
    }

    /// Longest inserted key that is a prefix of `key` (possibly `key` itself).
    pub fn longest_prefix(&self, key: &[u8]) -> Option<(&[u8], &V)> {
        let mut last = None;
        let mut node = &self.root;
        let mut search = key;
        loop {
            if let Some(leaf) = &node.leaf {
                last = Some(leaf);
            }
            let Some(&byte) = search.first() else {
                break;
            };
            let Some(child) = node.child(byte) else {
                break;
            };
            let Some(rest) = search.strip_prefix(child.prefix.as_slice()) else {
                break;
            };
            search = rest;
            node = child;
        }
        last.map(Leaf::entry)
    }

    /// Visits every entry in ascending key order.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        walk_node(&self.root, &mut f);
    }

    /// Visits, in ascending key order, every entry whose key starts with
    /// `prefix`.
    pub fn walk_prefix<F>(&self, prefix: &[u8], mut f: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        if let Some(node) = self.seek_prefix(prefix) {
            walk_node(node, &mut f);
        }
    }

    /// Visits every entry whose key is a prefix of `key`, shortest first.
    pub fn walk_path<F>(&self, key: &[u8], mut f: F)
    where
        F: FnMut(&[u8], &V) -> bool,
    {
        let mut node = &self.root;
        let mut search = key;
        loop {
            if let Some(leaf) = &node.leaf {
                let (k, v) = leaf.entry();
                if f(k, v) {
                    return;
                }
            }
            let Some(&byte) = search.first() else {
                return;
            };
            let Some(child) = node.child(byte) else {
                return;
            };
            let Some(rest) = search.strip_prefix(child.prefix.as_slice()) else {
                return;
            };
            search = rest;
            node = child;
        }
    }

    /// Root of the subtree holding exactly the keys that start with `prefix`.
    ///
    /// The prefix may end inside an edge label, in which case the child below
    /// that edge is returned.
    pub(crate) fn seek_prefix(&self, prefix: &[u8]) -> Option<&Node<V>> {
        let mut node = &self.root;
        let mut search = prefix;
        while let Some(&byte) = search.first() {
            let child = node.child(byte)?;
            if let Some(rest) = search.strip_prefix(child.prefix.as_slice()) {
                search = rest;
                node = child;
            } else if child.prefix.starts_with(search) {
                return Some(child);
            } else {
                return None;
            }
        }
        Some(node)
    }
}
