//! Scalar leaf nodes.
//!
//! A [`Value`] holds exactly one of null, boolean, string or number. Numbers
//! are kept as their decimal literal text ([`Number`]) rather than a parsed
//! float, so `1.50` stays `1.50` and integers beyond 64 bits survive a
//! decode/encode cycle byte for byte.

use crate::encoder::write_string;
use crate::error::JsonomError;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// A JSON number stored as its literal text.
///
/// Every `Number` holds text matching the JSON number grammar
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    /// Wrap literal text, returning `None` if it is not a valid JSON number.
    pub fn from_literal(text: impl Into<String>) -> Option<Number> {
        let text = text.into();
        if invalid_number_at(&text).is_none() {
            Some(Number(text))
        } else {
            None
        }
    }

    /// Text already checked by the lexer.
    pub(crate) fn from_validated(text: String) -> Number {
        Number(text)
    }

    /// Canonical literal for a float, `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Number> {
        if !f.is_finite() {
            return None;
        }
        serde_json::to_string(&f).ok().map(Number)
    }

    /// Canonical literal for a single-precision float, using its own
    /// shortest representation (`0.1f32` becomes `0.1`).
    pub fn from_f32(f: f32) -> Option<Number> {
        if !f.is_finite() {
            return None;
        }
        serde_json::to_string(&f).ok().map(Number)
    }

    /// The literal text exactly as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Nearest float to the literal. Precision beyond f64 is lost here and
    /// only here.
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Number {
    type Err = JsonomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match invalid_number_at(s) {
            None => Ok(Number(s.to_string())),
            Some(at) => Err(JsonomError::syntax(
                at as u64,
                format!("invalid number literal {s:?}"),
            )),
        }
    }
}

macro_rules! number_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number(n.to_string())
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Byte index of the first character that breaks the JSON number grammar,
/// or `None` when the whole string is a valid number. An empty or truncated
/// literal reports the index one past its end.
pub(crate) fn invalid_number_at(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = 0;

    if b.get(i) == Some(&b'-') {
        i += 1;
    }
    match b.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(b.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return Some(i),
    }
    if b.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return Some(i);
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(b.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(b.get(i), Some(b'0'..=b'9')) {
            return Some(i);
        }
        while matches!(b.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if i == b.len() {
        None
    } else {
        Some(i)
    }
}

/// The scalar carried by a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    String(String),
    Number(Number),
}

impl Scalar {
    fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::String(s) => serde_json::Value::String(s.clone()),
            // The literal is grammar-checked, so parsing cannot fail; with
            // arbitrary_precision the parsed number keeps the same text.
            Scalar::Number(n) => n
                .as_str()
                .parse::<serde_json::Number>()
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        }
    }
}

impl From<()> for Scalar {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Scalar::Null, Into::into)
    }
}

/// # Panics
///
/// Panics if `f` is NaN or infinite; JSON has no literal for them. Use
/// [`Number::from_f64`] to handle that case without panicking.
impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        match Number::from_f64(f) {
            Some(n) => Scalar::Number(n),
            None => panic!("cannot represent {f} as a JSON number"),
        }
    }
}

/// # Panics
///
/// Panics if `f` is NaN or infinite.
impl From<f32> for Scalar {
    fn from(f: f32) -> Self {
        match Number::from_f32(f) {
            Some(n) => Scalar::Number(n),
            None => panic!("cannot represent {f} as a JSON number"),
        }
    }
}

macro_rules! scalar_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::Number(Number::from(n))
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// A leaf node: null, boolean, string or number.
///
/// ```
/// use jsonom_core::{Value, Scalar};
///
/// let v = Value::new(42);
/// assert_eq!(v.to_string(), "42");
///
/// let n = Value::new(1.5);
/// assert!(matches!(n.get(), Scalar::Number(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Value {
    scalar: Scalar,
}

impl Value {
    /// Build a value from anything convertible to a [`Scalar`]. Integers and
    /// floats are converted to their canonical JSON literal.
    ///
    /// # Panics
    ///
    /// Panics on a non-finite float.
    pub fn new(scalar: impl Into<Scalar>) -> Self {
        Value {
            scalar: scalar.into(),
        }
    }

    pub fn null() -> Self {
        Value::default()
    }

    pub fn get(&self) -> &Scalar {
        &self.scalar
    }

    /// Replace the stored scalar. Same conversion rules as [`Value::new`].
    pub fn set(&mut self, scalar: impl Into<Scalar>) {
        self.scalar = scalar.into();
    }

    pub fn into_scalar(self) -> Scalar {
        self.scalar
    }

    pub fn is_null(&self) -> bool {
        matches!(self.scalar, Scalar::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.scalar {
            Scalar::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.scalar {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match &self.scalar {
            Scalar::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Generic projection of the scalar. Numbers keep their literal text.
    pub fn marshal(&self) -> serde_json::Value {
        self.scalar.to_json()
    }

    /// Write the JSON literal for this value. Numbers are written as their
    /// stored text, never re-derived.
    pub fn encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        match &self.scalar {
            Scalar::Null => w.write_all(b"null"),
            Scalar::Bool(true) => w.write_all(b"true"),
            Scalar::Bool(false) => w.write_all(b"false"),
            Scalar::String(s) => write_string(w, s),
            Scalar::Number(n) => w.write_all(n.as_str().as_bytes()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scalar {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => f.write_str(n.as_str()),
        }
    }
}

macro_rules! value_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::new(v)
                }
            }
        )*
    };
}

value_from!(
    (), bool, &str, String, Number, Scalar, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16,
    u32, u64, u128, usize
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_grammar() {
        for ok in ["0", "-0", "1.50", "1e10", "1E+2", "-3.25e-7", "100000000000000000001"] {
            assert_eq!(invalid_number_at(ok), None, "{ok}");
        }
        assert_eq!(invalid_number_at(""), Some(0));
        assert_eq!(invalid_number_at("-"), Some(1));
        assert_eq!(invalid_number_at("01"), Some(1));
        assert_eq!(invalid_number_at("1."), Some(2));
        assert_eq!(invalid_number_at(".5"), Some(0));
        assert_eq!(invalid_number_at("1e"), Some(2));
        assert_eq!(invalid_number_at("+1"), Some(0));
        assert_eq!(invalid_number_at("1x"), Some(1));
    }

    #[test]
    fn float_literals_are_canonical() {
        assert_eq!(Number::from_f64(1.5).unwrap().as_str(), "1.5");
        assert_eq!(Number::from_f32(0.1).unwrap().as_str(), "0.1");
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn integer_literals() {
        assert_eq!(Number::from(-7i32).as_str(), "-7");
        assert_eq!(Number::from(u64::MAX).as_str(), "18446744073709551615");
    }

    #[test]
    #[should_panic(expected = "cannot represent")]
    fn nan_value_panics() {
        let _ = Value::new(f64::NAN);
    }
}
