//! Insertion-ordered JSON object with constant-time key lookup.
//!
//! An [`Object`] keeps two structures side by side: the ordered list of
//! key-value pairs, and a table from key to that pair's current position.
//! Every mutating method updates both before returning, so for every key `k`
//! present, `index[k]` is the position of `k` in the list.
//!
//! - Adding a new key appends it.
//! - Setting an existing key replaces the value in place; its position does
//!   not change.
//! - Removing a key shifts every later pair down by one, and the positions of
//!   all later keys are decremented to match.

use crate::encoder::write_string;
use crate::node::Node;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

/// One member of an [`Object`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    key: Arc<str>,
    value: Node,
}

impl KeyValue {
    pub fn new(key: impl Into<Arc<str>>, value: impl Into<Node>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A pair whose value is JSON `null`.
    pub fn null(key: impl Into<Arc<str>>) -> Self {
        KeyValue::new(key, Node::null())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The shared key instance, as produced by the interner when decoded.
    pub fn shared_key(&self) -> &Arc<str> {
        &self.key
    }

    pub fn value(&self) -> &Node {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Node {
        &mut self.value
    }

    /// Replace the value, keeping the key.
    pub fn set(&mut self, value: impl Into<Node>) {
        self.value = value.into();
    }

    pub fn into_parts(self) -> (Arc<str>, Node) {
        (self.key, self.value)
    }

    /// Write `"key":value`.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        write_string(w, &self.key)?;
        w.write_all(b":")?;
        self.value.encode(w)
    }
}

/// A JSON object that remembers member order.
///
/// ```
/// use jsonom_core::Object;
///
/// let mut obj = Object::default();
/// obj.set("x", 1);
/// obj.set("y", 2);
/// obj.remove("x");
/// obj.set("z", 3);
/// assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["y", "z"]);
/// assert!(obj.get("x").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Object {
    kv: Vec<KeyValue>,
    index: HashMap<Arc<str>, usize>,
}

impl Object {
    /// Build an object from pairs, applying [`add_or_set`](Object::add_or_set)
    /// to each in turn. A repeated key keeps its first position and its last
    /// value.
    pub fn new(pairs: impl IntoIterator<Item = KeyValue>) -> Self {
        let mut obj = Object::default();
        for pair in pairs {
            obj.add_or_set(pair);
        }
        obj
    }

    pub fn len(&self) -> usize {
        self.kv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kv.is_empty()
    }

    /// The pair at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`Object::get_index`] for a checked
    /// lookup.
    pub fn n(&self, index: usize) -> &KeyValue {
        &self.kv[index]
    }

    pub fn get_index(&self, index: usize) -> Option<&KeyValue> {
        self.kv.get(index)
    }

    /// The pair stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&KeyValue> {
        self.index.get(key).map(|&ix| &self.kv[ix])
    }

    /// The value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&Node> {
        self.get(key).map(KeyValue::value)
    }

    pub fn value_mut(&mut self, key: &str) -> Option<&mut Node> {
        let ix = *self.index.get(key)?;
        Some(&mut self.kv[ix].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Append `pair` if its key is new, otherwise replace the existing pair
    /// at its current position. Returns `true` if the key was added, `false`
    /// if an existing pair was replaced.
    pub fn add_or_set(&mut self, pair: KeyValue) -> bool {
        if let Some(&ix) = self.index.get(pair.key()) {
            self.kv[ix] = pair;
            return false;
        }
        let ix = self.kv.len();
        self.index.insert(Arc::clone(&pair.key), ix);
        self.kv.push(pair);
        true
    }

    /// Set `key` to `value`; see [`add_or_set`](Object::add_or_set).
    pub fn set(&mut self, key: impl Into<Arc<str>>, value: impl Into<Node>) -> bool {
        self.add_or_set(KeyValue::new(key, value))
    }

    /// Remove `key`. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Remove `key` and return its pair.
    pub fn take(&mut self, key: &str) -> Option<KeyValue> {
        let ix = self.index.remove(key)?;
        for pos in self.index.values_mut() {
            if *pos > ix {
                *pos -= 1;
            }
        }
        Some(self.kv.remove(ix))
    }

    /// Remove every pair.
    pub fn clear(&mut self) {
        self.kv.clear();
        self.index.clear();
    }

    /// Pairs in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.kv.iter()
    }

    /// Keys in position order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.kv.iter().map(KeyValue::key)
    }

    /// Generic projection: a map from key to each value's projection.
    ///
    /// This is a one-way, lossy conversion. Callers must not rely on the
    /// map's iteration order; use [`Object::encode`] or [`Object::iter`] when
    /// member order matters.
    pub fn marshal(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.kv.len());
        for pair in &self.kv {
            map.insert(pair.key().to_string(), pair.value.marshal());
        }
        serde_json::Value::Object(map)
    }

    /// Write `{` pairs joined by `,` `}` in position order.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"{")?;
        for (i, pair) in self.kv.iter().enumerate() {
            if i > 0 {
                w.write_all(b",")?;
            }
            pair.encode(w)?;
        }
        w.write_all(b"}")
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.kv == other.kv
    }
}

impl Eq for Object {}

impl FromIterator<KeyValue> for Object {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        Object::new(iter)
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.kv.iter()
    }
}
