use std::iter::FusedIterator;

use crate::node::Node;
use crate::RadixTree;

/// Iterator over `(key, value)` pairs in ascending key order.
pub struct Iter<'a, V> {
    /// Nodes still to visit; the next one is on top.
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn new(start: Option<&'a Node<V>>) -> Self {
        Self {
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Children go on the stack in reverse so the smallest edge pops first.
            self.stack.extend(node.edges.iter().rev().map(|edge| &edge.node));
            if let Some(leaf) = &node.leaf {
                return Some(leaf.entry());
            }
        }
        None
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

pub struct Keys<'a, V>(Iter<'a, V>);

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }
}

pub struct Values<'a, V>(Iter<'a, V>);

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

impl<V> RadixTree<V> {
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(Some(&self.root))
    }

    /// Entries whose key starts with `prefix`, in ascending key order.
    pub fn iter_prefix(&self, prefix: &[u8]) -> Iter<'_, V> {
        Iter::new(self.seek_prefix(prefix))
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, V> {
        Values(self.iter())
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
