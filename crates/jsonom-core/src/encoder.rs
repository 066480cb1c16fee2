//! Encoder — writes a node tree back out as compact JSON.
//!
//! The output uses `,` and `:` with no whitespace and no trailing newline.
//! Objects are written in their stored pair order and numbers as their stored
//! literal text, so for documents with unique keys `encode(decode(doc))`
//! reproduces `doc` up to insignificant whitespace.
//!
//! Writes go straight to the sink in document order. The first failing write
//! aborts the encode and its `io::Error` is returned as-is; whatever was
//! already written stays written.
//!
//! # Example
//! ```
//! use jsonom_core::{decode, encode_to_string};
//!
//! let node = decode(br#"{ "b": 1.50, "a": [true, null] }"#, None).unwrap().unwrap();
//! assert_eq!(encode_to_string(&node).unwrap(), r#"{"b":1.50,"a":[true,null]}"#);
//! ```

use crate::node::Node;
use std::io::{self, Write};

/// Encode `node` into `w`.
pub fn encode<W: Write + ?Sized>(node: &Node, w: &mut W) -> io::Result<()> {
    match node {
        Node::Object(obj) => obj.encode(w),
        Node::Array(arr) => arr.encode(w),
        Node::Value(val) => val.encode(w),
    }
}

/// Encode `node` into a fresh byte buffer.
pub fn encode_to_vec(node: &Node) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    encode(node, &mut out)?;
    Ok(out)
}

/// Encode `node` into a `String`.
pub fn encode_to_string(node: &Node) -> io::Result<String> {
    let bytes = encode_to_vec(node)?;
    // Every byte written is either ASCII or copied from a `str`.
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write `s` as a quoted JSON string.
///
/// Escapes `"`, `\` and control characters; `\b \f \n \r \t` use their short
/// forms and the remaining controls use `\u00XX`. Everything else, including
/// non-ASCII text, is copied through unchanged.
pub(crate) fn write_string<W: Write + ?Sized>(w: &mut W, s: &str) -> io::Result<()> {
    w.write_all(b"\"")?;
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b >= 0x20 && b != b'"' && b != b'\\' {
            continue;
        }
        if start < i {
            w.write_all(&bytes[start..i])?;
        }
        match short_escape(b) {
            Some(esc) => w.write_all(esc)?,
            None => write!(w, "\\u{b:04x}")?,
        }
        start = i + 1;
    }
    if start < bytes.len() {
        w.write_all(&bytes[start..])?;
    }
    w.write_all(b"\"")
}

fn short_escape(b: u8) -> Option<&'static [u8]> {
    match b {
        b'"' => Some(b"\\\""),
        b'\\' => Some(b"\\\\"),
        b'\n' => Some(b"\\n"),
        b'\r' => Some(b"\\r"),
        b'\t' => Some(b"\\t"),
        0x08 => Some(b"\\b"),
        0x0c => Some(b"\\f"),
        _ => None,
    }
}
