//! Decoder — builds a node tree from a JSON token stream.
//!
//! Recursive descent keyed on the next token:
//!
//! - `{` → read `key, value` pairs until `}`. Each key goes through the
//!   [`StringInterner`] before it is stored.
//! - `[` → read elements until `]`. The element reader reports "closing
//!   bracket reached" separately from "element produced", so the array loop
//!   stops without consuming a token that belongs to the parent.
//! - scalars → a [`Value`] leaf. Number literals are stored as written.
//!
//! Empty input is not an error: the top-level entry points return
//! `Ok(None)`. Anything malformed or truncated aborts the whole decode with
//! [`JsonomError::Syntax`]; no partial tree is returned.
//!
//! # Example
//! ```
//! use jsonom_core::{decode, MapInterner};
//!
//! let mut interner = MapInterner::new();
//! let node = decode(br#"[{"id":1},{"id":2}]"#, Some(&mut interner)).unwrap().unwrap();
//! assert_eq!(node.as_array().unwrap().len(), 2);
//! assert_eq!(interner.len(), 1);
//! ```

use crate::array::Array;
use crate::error::{JsonomError, Result};
use crate::intern::{MapInterner, StringInterner};
use crate::lexer::{Lexer, Token, TokenSource};
use crate::node::Node;
use crate::object::{KeyValue, Object};
use crate::value::{Number, Value};
use std::io::Read;

/// Nesting depth at which decoding gives up rather than risk exhausting the
/// stack.
pub const MAX_DEPTH: usize = 256;

/// Decode the first JSON document in `input`.
///
/// `interner` is used for object keys when given, and keeps accumulating
/// across calls; otherwise a private interner lives for this call only.
pub fn decode(input: &[u8], interner: Option<&mut dyn StringInterner>) -> Result<Option<Node>> {
    decode_reader(input, interner)
}

/// Decode the first JSON document read from `input`.
pub fn decode_reader<R: Read>(
    input: R,
    interner: Option<&mut dyn StringInterner>,
) -> Result<Option<Node>> {
    let mut lexer = Lexer::new(input);
    decode_tokens(&mut lexer, interner)
}

/// Decode one document from an existing token source. Calling this again on
/// the same [`Lexer`] reads the next concatenated document.
pub fn decode_tokens<T: TokenSource + ?Sized>(
    tokens: &mut T,
    interner: Option<&mut dyn StringInterner>,
) -> Result<Option<Node>> {
    let mut private = MapInterner::default();
    let interner: &mut dyn StringInterner = match interner {
        Some(interner) => interner,
        None => &mut private,
    };
    let mut decoder = Decoder {
        tokens,
        interner,
        depth: 0,
    };
    match decoder.tokens.next_token()? {
        None => Ok(None),
        Some(tok) => decoder.node_from(tok).map(Some),
    }
}

struct Decoder<'a, T: ?Sized> {
    tokens: &'a mut T,
    interner: &'a mut dyn StringInterner,
    depth: usize,
}

impl<T: TokenSource + ?Sized> Decoder<'_, T> {
    fn error(&self, message: impl Into<String>) -> JsonomError {
        JsonomError::syntax(self.tokens.offset(), message)
    }

    /// Next token, treating end of input as truncation.
    fn require_token(&mut self) -> Result<Token> {
        match self.tokens.next_token()? {
            Some(tok) => Ok(tok),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// Build the node that `tok` starts.
    fn node_from(&mut self, tok: Token) -> Result<Node> {
        match tok {
            Token::BeginObject => self.nested(Self::decode_object).map(Node::Object),
            Token::BeginArray => self.nested(Self::decode_array).map(Node::Array),
            Token::EndObject => Err(self.error("unexpected '}'")),
            Token::EndArray => Err(self.error("unexpected ']'")),
            scalar => self.value_from(scalar).map(Node::Value),
        }
    }

    fn nested<C>(&mut self, decode: impl FnOnce(&mut Self) -> Result<C>) -> Result<C> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        self.depth += 1;
        let container = decode(self);
        self.depth -= 1;
        container
    }

    /// Members up to and including the closing `}`; the `{` is consumed.
    fn decode_object(&mut self) -> Result<Object> {
        let mut obj = Object::default();
        loop {
            let key = match self.require_token()? {
                Token::EndObject => break,
                Token::String(key) => self.interner.intern(&key),
                other => return Err(self.error(format!("expected object key, found {other:?}"))),
            };
            let tok = self.require_token()?;
            let value = self.node_from(tok)?;
            obj.add_or_set(KeyValue::new(key, value));
        }
        Ok(obj)
    }

    /// Elements up to and including the closing `]`; the `[` is consumed.
    fn decode_array(&mut self) -> Result<Array> {
        let mut arr = Array::default();
        while let Some(node) = self.decode_element()? {
            arr.push(node);
        }
        Ok(arr)
    }

    /// One array element, or `None` once the closing `]` is read.
    fn decode_element(&mut self) -> Result<Option<Node>> {
        match self.require_token()? {
            Token::EndArray => Ok(None),
            tok => self.node_from(tok).map(Some),
        }
    }

    fn value_from(&self, tok: Token) -> Result<Value> {
        let value = match tok {
            Token::Null => Value::null(),
            Token::Bool(b) => Value::new(b),
            Token::String(s) => Value::new(s),
            Token::Number(n) => Value::new(n),
            Token::Int(i) => Value::new(i),
            Token::UInt(u) => Value::new(u),
            Token::Float(f) => match Number::from_f64(f) {
                Some(n) => Value::new(n),
                None => return Err(self.error(format!("{f} is not a JSON number"))),
            },
            Token::BeginObject | Token::EndObject | Token::BeginArray | Token::EndArray => {
                return Err(self.error(format!("expected a scalar, found {tok:?}")));
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenIter;
    use crate::value::Scalar;

    fn decode_stream(tokens: Vec<Token>) -> Result<Option<Node>> {
        decode_tokens(&mut TokenIter::new(tokens), None)
    }

    #[test]
    fn native_numbers_become_canonical_literals() {
        let node = decode_stream(vec![
            Token::BeginArray,
            Token::Int(-3),
            Token::UInt(u64::MAX),
            Token::Float(2.5),
            Token::EndArray,
        ])
        .unwrap()
        .unwrap();
        let arr = node.as_array().unwrap();
        let lits: Vec<_> = arr
            .iter()
            .map(|n| n.as_value().and_then(Value::as_number).unwrap().as_str().to_string())
            .collect();
        assert_eq!(lits, vec!["-3", "18446744073709551615", "2.5"]);
    }

    #[test]
    fn non_finite_float_token_is_rejected() {
        let err = decode_stream(vec![Token::Float(f64::NAN)]).unwrap_err();
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn non_string_key_is_syntax_error() {
        let err = decode_stream(vec![Token::BeginObject, Token::Int(1), Token::Null])
            .unwrap_err();
        assert!(matches!(err, JsonomError::Syntax { offset: 2, .. }));
    }

    #[test]
    fn stream_ending_inside_object() {
        let err = decode_stream(vec![Token::BeginObject, Token::String("k".into())])
            .unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn stream_ending_inside_array() {
        let err = decode_stream(vec![Token::BeginArray, Token::Null]).unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn stray_closing_delimiter() {
        let err = decode_stream(vec![Token::EndArray]).unwrap_err();
        assert_eq!(err.offset(), Some(1));
        let err = decode_stream(vec![Token::BeginArray, Token::EndObject]).unwrap_err();
        assert_eq!(err.offset(), Some(2));
    }

    #[test]
    fn duplicate_keys_in_stream_keep_first_position() {
        let node = decode_stream(vec![
            Token::BeginObject,
            Token::String("a".into()),
            Token::Int(1),
            Token::String("b".into()),
            Token::Int(2),
            Token::String("a".into()),
            Token::Int(3),
            Token::EndObject,
        ])
        .unwrap()
        .unwrap();
        let obj = node.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            obj.value("a").and_then(Node::as_value).map(Value::get),
            Some(&Scalar::Number(Number::from(3)))
        );
    }

    #[test]
    fn depth_limit() {
        let deep = "[".repeat(MAX_DEPTH + 1);
        let err = decode(deep.as_bytes(), None).unwrap_err();
        assert_eq!(err.offset(), Some(MAX_DEPTH as u64 + 1));

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(decode(ok.as_bytes(), None).unwrap().is_some());
    }
}
