//! Ordered, index-addressable sequence of nodes.

use crate::node::Node;
use std::io::{self, Write};

/// A JSON array.
///
/// Slots always exist; an "empty" slot holds a null [`Value`](crate::Value)
/// node. An index stays valid until an element below it is removed or the
/// array is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array {
    nodes: Vec<Node>,
}

impl Array {
    /// Build an array from the given nodes, in order.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        Array {
            nodes: nodes.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`Array::get`] for a checked lookup.
    pub fn n(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Mutable access to the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn n_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Replace the node at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, node: impl Into<Node>) -> Node {
        std::mem::replace(&mut self.nodes[index], node.into())
    }

    /// Add a node at the end.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    /// Add nodes at the end, in order.
    pub fn append(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    /// Remove the node at `index`, shifting later elements down by one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> Node {
        self.nodes.remove(index)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Call `visit` with each `(index, node)` in order until it returns
    /// `false`. Returns `true` if every element was visited.
    ///
    /// ```
    /// use jsonom_core::{Array, Node};
    ///
    /// let arr = Array::new([Node::from(1), Node::from(2), Node::from(3)]);
    /// let mut seen = Vec::new();
    /// let completed = arr.each(|i, _| {
    ///     seen.push(i);
    ///     i < 1
    /// });
    /// assert!(!completed);
    /// assert_eq!(seen, vec![0, 1]);
    /// ```
    pub fn each<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(usize, &Node) -> bool,
    {
        for (index, node) in self.nodes.iter().enumerate() {
            if !visit(index, node) {
                return false;
            }
        }
        true
    }

    /// Generic projection: each element's projection, in order.
    pub fn marshal(&self) -> serde_json::Value {
        serde_json::Value::Array(self.nodes.iter().map(Node::marshal).collect())
    }

    /// Write `[` elements joined by `,` `]`.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                w.write_all(b",")?;
            }
            node.encode(w)?;
        }
        w.write_all(b"]")
    }
}

impl FromIterator<Node> for Array {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Array::new(iter)
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl IntoIterator for Array {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}
