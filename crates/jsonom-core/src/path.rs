//! Path-query protocol.
//!
//! A path-query evaluator does not need to know how a document is stored; it
//! only needs the handful of callbacks in [`PathModel`]: classify a node,
//! measure an array, look up an object member or array element, list an
//! object's keys, and read a scalar. [`PathAdapter`] provides them over a
//! borrowed [`Node`] tree. All traversal and query semantics live in the
//! evaluator; the adapter never walks the tree on its own.

use crate::node::{Node, NodeKind};
use crate::value::Scalar;

/// Callbacks a path-query evaluator uses to navigate a document.
///
/// Node handles are cheap `Copy` values borrowed from the document for
/// `'doc`.
pub trait PathModel<'doc> {
    type Node: Copy;
    type Scalar: ?Sized + 'doc;

    /// The document root.
    fn root(&self) -> Self::Node;

    /// Whether `node` is an object, an array or a scalar.
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Element count of an array; 0 for anything else.
    fn len(&self, node: Self::Node) -> usize;

    /// Member `key` of an object. `None` if `node` is not an object or has
    /// no such key.
    fn key(&self, node: Self::Node, key: &str) -> Option<Self::Node>;

    /// An object's keys in document order; empty for anything else.
    fn keys(&self, node: Self::Node) -> Vec<&'doc str>;

    /// Element `index` of an array. `None` if `node` is not an array or the
    /// index is out of range.
    fn elem(&self, node: Self::Node, index: usize) -> Option<Self::Node>;

    /// The scalar held by a value node; `None` for objects and arrays.
    fn value(&self, node: Self::Node) -> Option<&'doc Self::Scalar>;
}

/// [`PathModel`] over a node tree.
///
/// ```
/// use jsonom_core::{decode, NodeKind, PathAdapter, PathModel, Scalar};
///
/// let doc = decode(br#"{"a":[10,20]}"#, None).unwrap().unwrap();
/// let model = PathAdapter::new(&doc);
/// let a = model.key(model.root(), "a").unwrap();
/// assert_eq!(model.kind(a), NodeKind::Array);
/// assert_eq!(model.len(a), 2);
/// let second = model.elem(a, 1).unwrap();
/// assert!(matches!(model.value(second), Some(Scalar::Number(n)) if n.as_str() == "20"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathAdapter<'doc> {
    root: &'doc Node,
}

impl<'doc> PathAdapter<'doc> {
    pub fn new(root: &'doc Node) -> Self {
        PathAdapter { root }
    }
}

impl<'doc> PathModel<'doc> for PathAdapter<'doc> {
    type Node = &'doc Node;
    type Scalar = Scalar;

    fn root(&self) -> &'doc Node {
        self.root
    }

    fn kind(&self, node: &'doc Node) -> NodeKind {
        node.kind()
    }

    fn len(&self, node: &'doc Node) -> usize {
        node.as_array().map_or(0, |arr| arr.len())
    }

    fn key(&self, node: &'doc Node, key: &str) -> Option<&'doc Node> {
        node.as_object()?.value(key)
    }

    fn keys(&self, node: &'doc Node) -> Vec<&'doc str> {
        match node.as_object() {
            Some(obj) => obj.keys().collect(),
            None => Vec::new(),
        }
    }

    fn elem(&self, node: &'doc Node, index: usize) -> Option<&'doc Node> {
        node.as_array()?.get(index)
    }

    fn value(&self, node: &'doc Node) -> Option<&'doc Scalar> {
        node.as_value().map(|v| v.get())
    }
}
