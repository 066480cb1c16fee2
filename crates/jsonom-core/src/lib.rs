//! # jsonom-core
//!
//! A mutable, order-preserving JSON object model.
//!
//! Decoding a document into a generic map and encoding it again can reorder
//! members and rewrites numbers like `1.50` or `100000000000000000001`.
//! This crate keeps both intact: objects remember member
//! order and offer constant-time key lookup, and numbers are stored as their
//! literal text. A document can be read, edited in place, and written back
//! with member order and number text intact. String escapes are normalised
//! on the way through: `"\u0041"` comes back as `"A"` and `"a\/b"` as
//! `"a/b"`.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonom_core::{decode, encode_to_string};
//!
//! let mut doc = decode(br#"{"name":"Alice","score":1.50,"tags":["a"]}"#, None)
//!     .unwrap()
//!     .unwrap();
//!
//! let obj = doc.as_object_mut().unwrap();
//! obj.set("score", 2);
//! obj.set("active", true);
//! obj.remove("tags");
//!
//! assert_eq!(
//!     encode_to_string(&doc).unwrap(),
//!     r#"{"name":"Alice","score":2,"active":true}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`node`] — the closed [`Node`] type: object, array or value
//! - [`object`] — ordered [`Object`] and its [`KeyValue`] members
//! - [`array`] — [`Array`]
//! - [`value`] — scalar [`Value`] and literal-preserving [`Number`]
//! - [`intern`] — key interning ([`StringInterner`], [`MapInterner`])
//! - [`lexer`] — streaming tokenizer
//! - [`decoder`] — token stream → tree
//! - [`encoder`] — tree → compact JSON
//! - [`path`] — callbacks for external path-query evaluators
//! - [`error`] — error types

pub mod array;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod intern;
pub mod lexer;
pub mod node;
pub mod object;
pub mod path;
pub mod value;

pub use array::Array;
pub use decoder::{decode, decode_reader, decode_tokens};
pub use encoder::{encode, encode_to_string, encode_to_vec};
pub use error::{JsonomError, Result};
pub use intern::{MapInterner, StringInterner};
pub use lexer::{Lexer, Token, TokenIter, TokenSource};
pub use node::{Node, NodeKind};
pub use object::{KeyValue, Object};
pub use path::{PathAdapter, PathModel};
pub use value::{Number, Scalar, Value};
