//! The closed node type every tree is built from.

use crate::array::Array;
use crate::object::Object;
use crate::value::{Number, Scalar, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// One element of a JSON tree: exactly one of object, array or scalar value.
///
/// A parent exclusively owns its children, so a tree can never contain a
/// cycle or a shared subtree. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Object(Object),
    Array(Array),
    Value(Value),
}

/// Classification of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    Value,
}

impl Node {
    /// A `null` value node.
    pub fn null() -> Self {
        Node::Value(Value::null())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
            Node::Value(_) => NodeKind::Value,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Value(v) if v.is_null())
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Node::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Value(val) => Some(val),
            _ => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Node::Value(val) => Some(val),
            _ => None,
        }
    }

    /// Generic projection into `serde_json::Value`, for handing the tree to
    /// code that works with untyped JSON.
    ///
    /// Objects become maps with no ordering guarantee (see
    /// [`Object::marshal`]); numbers keep their literal text.
    pub fn marshal(&self) -> serde_json::Value {
        match self {
            Node::Object(obj) => obj.marshal(),
            Node::Array(arr) => arr.marshal(),
            Node::Value(val) => val.marshal(),
        }
    }

    /// Write this node as compact JSON. See [`crate::encoder`].
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        crate::encoder::encode(self, w)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::encoder::encode_to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for Node {
    type Err = crate::error::JsonomError;

    /// Decode `s`. Empty or all-whitespace input decodes to a null value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::decoder::decode(s.as_bytes(), None)?.unwrap_or_else(Node::null))
    }
}

impl From<Object> for Node {
    fn from(obj: Object) -> Self {
        Node::Object(obj)
    }
}

impl From<Array> for Node {
    fn from(arr: Array) -> Self {
        Node::Array(arr)
    }
}

impl From<Value> for Node {
    fn from(val: Value) -> Self {
        Node::Value(val)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::Array(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! node_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(v: $t) -> Self {
                    Node::Value(Value::new(v))
                }
            }
        )*
    };
}

node_from_scalar!(
    (), bool, &str, String, Number, Scalar, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16,
    u32, u64, u128, usize
);

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Object(obj) => obj.serialize(serializer),
            Node::Array(arr) => arr.serialize(serializer),
            Node::Value(val) => val.serialize(serializer),
        }
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for pair in self {
            map.serialize_entry(pair.key(), pair.value())?;
        }
        map.end()
    }
}

impl Serialize for Array {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for node in self {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.get() {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Number(n) => serialize_number(n, serializer),
        }
    }
}

/// Numbers go out as native serde integers or floats, so every data format
/// sees a number. Integer literals keep their exact value up to 128 bits;
/// everything else passes through `f64`, so `1.50` serializes as `1.5`. The
/// encoder is the way to keep literal text.
///
/// A literal outside the `f64` range (`1e400`) falls back to
/// `serde_json::Number`, which only serde_json's own serializer writes as a
/// number.
fn serialize_number<S: Serializer>(n: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    let text = n.as_str();
    if !text.contains(['.', 'e', 'E']) {
        if let Some(i) = n.as_i64() {
            return serializer.serialize_i64(i);
        }
        if let Some(u) = n.as_u64() {
            return serializer.serialize_u64(u);
        }
        if let Ok(i) = text.parse::<i128>() {
            return serializer.serialize_i128(i);
        }
        if let Ok(u) = text.parse::<u128>() {
            return serializer.serialize_u128(u);
        }
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => serializer.serialize_f64(f),
        _ => text
            .parse::<serde_json::Number>()
            .map_err(S::Error::custom)?
            .serialize(serializer),
    }
}
