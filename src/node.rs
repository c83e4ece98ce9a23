//! Node and edge representation.
//!
//! A node owns the label of the edge leading into it (`prefix`) and its
//! children, stored as a vector sorted by leading byte. Concatenating the
//! prefixes from the root down to a node yields that node's path; a node whose
//! path is an inserted key carries a [`Leaf`] with the full key.

use smallvec::SmallVec;

// =============================================================================
// Configuration
// =============================================================================

/// Inline capacity of a node prefix before it spills to the heap.
pub(crate) const INLINE_PREFIX: usize = 16;

pub(crate) type Prefix = SmallVec<[u8; INLINE_PREFIX]>;

/// Length of the longest common prefix of `a` and `b`.
#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

// =============================================================================
// Leaf / Edge / Node
// =============================================================================

#[derive(Clone, Debug)]
pub(crate) struct Leaf<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
}

impl<V> Leaf<V> {
    pub(crate) fn new(key: &[u8], value: V) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    #[inline]
    pub(crate) fn entry(&self) -> (&[u8], &V) {
        (&self.key[..], &self.value)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Edge<V> {
    /// Leading byte of `node.prefix`, kept beside the child for dispatch.
    pub(crate) label: u8,
    pub(crate) node: Node<V>,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) prefix: Prefix,
    pub(crate) leaf: Option<Leaf<V>>,
    pub(crate) edges: Vec<Edge<V>>,
}

impl<V> Node<V> {
    pub(crate) fn empty() -> Self {
        Self {
            prefix: Prefix::new(),
            leaf: None,
            edges: Vec::new(),
        }
    }

    pub(crate) fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            prefix: Prefix::from_slice(prefix),
            leaf: None,
            edges: Vec::new(),
        }
    }

    /// A childless node holding `leaf`, reached through `prefix`.
    pub(crate) fn leaf_node(prefix: &[u8], leaf: Leaf<V>) -> Self {
        debug_assert!(!prefix.is_empty());
        Self {
            prefix: Prefix::from_slice(prefix),
            leaf: Some(leaf),
            edges: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Index of the edge starting with `byte`, or the insertion point that
    /// keeps the edges sorted.
    #[inline]
    pub(crate) fn find_edge(&self, byte: u8) -> Result<usize, usize> {
        self.edges.binary_search_by_key(&byte, |e| e.label)
    }

    #[inline]
    pub(crate) fn child(&self, byte: u8) -> Option<&Node<V>> {
        self.find_edge(byte).ok().map(|i| &self.edges[i].node)
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, byte: u8) -> Option<&mut Node<V>> {
        match self.find_edge(byte) {
            Ok(i) => Some(&mut self.edges[i].node),
            Err(_) => None,
        }
    }

    /// Links `node` as a child. No existing edge may share its leading byte.
    pub(crate) fn add_child(&mut self, node: Node<V>) {
        let label = node.prefix[0];
        match self.find_edge(label) {
            Ok(_) => debug_assert!(false, "duplicate edge label {label:#04x}"),
            Err(pos) => self.edges.insert(pos, Edge { label, node }),
        }
    }

    pub(crate) fn first_child(&self) -> Option<&Node<V>> {
        self.edges.first().map(|e| &e.node)
    }

    pub(crate) fn last_child(&self) -> Option<&Node<V>> {
        self.edges.last().map(|e| &e.node)
    }

    /// Absorbs the only child into `self`: prefixes are concatenated and the
    /// child's leaf and edges move up.
    pub(crate) fn merge_child(&mut self) {
        debug_assert!(self.leaf.is_none());
        debug_assert_eq!(self.edges.len(), 1);
        let Some(edge) = self.edges.pop() else {
            return;
        };
        let child = edge.node;
        self.prefix.extend_from_slice(&child.prefix);
        self.leaf = child.leaf;
        self.edges = child.edges;
    }

    /// Restores path compression for the child at `idx` after a removal
    /// somewhere beneath it: an empty child is unlinked, a leafless child with
    /// a single edge is merged with that edge's node.
    pub(crate) fn compact_child(&mut self, idx: usize) {
        let child = &mut self.edges[idx].node;
        if child.is_leaf() {
            return;
        }
        match child.edges.len() {
            0 => {
                tracing::trace!(
                    target: "radix_map::remove",
                    prefix_len = child.prefix.len(),
                    "pruning empty node"
                );
                self.edges.remove(idx);
            }
            1 => {
                tracing::trace!(
                    target: "radix_map::remove",
                    prefix_len = child.prefix.len(),
                    "merging node into its only child"
                );
                child.merge_child();
            }
            _ => {}
        }
    }

    /// Number of leaves in the subtree rooted at `self`.
    pub(crate) fn leaf_count(&self) -> usize {
        let below: usize = self.edges.iter().map(|e| e.node.leaf_count()).sum();
        below + usize::from(self.is_leaf())
    }
}
