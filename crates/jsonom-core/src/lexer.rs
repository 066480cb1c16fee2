//! Streaming JSON tokenizer.
//!
//! [`Lexer`] pulls bytes from any `std::io::Read` and yields one [`Token`]
//! at a time. It tracks nesting itself and checks the separators between
//! tokens (`:` after a key, `,` between members and elements), so callers
//! only ever see structural delimiters and scalars:
//!
//! ```text
//! {"a":[1,true]}  =>  BeginObject String("a") BeginArray Number(1) Bool(true) EndArray EndObject
//! ```
//!
//! Object keys and string values both come out as [`Token::String`]; the
//! consumer tells them apart by position.
//!
//! Once a top-level value is complete the lexer accepts another one, so a
//! stream of concatenated documents can be read value by value.
//! [`Lexer::next_token`] returns `Ok(None)` only at a clean end of input.

use crate::error::{JsonomError, Result};
use crate::value::{invalid_number_at, Number};
use std::io::{BufRead, BufReader, Read};

/// A token of a JSON document.
///
/// [`Lexer`] only produces the first eight variants. The native numeric
/// variants exist for programmatic token sources; the decoder turns them
/// into canonical number literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    /// An object key or a string value, unescaped.
    String(String),
    /// A number literal exactly as written.
    Number(Number),
    Bool(bool),
    Null,
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Anything the decoder can pull tokens from.
pub trait TokenSource {
    /// The next token, or `None` at a clean end of input.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// Position used in error reports.
    fn offset(&self) -> u64;
}

/// Adapts an iterator of tokens into a [`TokenSource`]. The reported offset
/// is the number of tokens consumed so far.
#[derive(Debug)]
pub struct TokenIter<I> {
    iter: I,
    consumed: u64,
}

impl<I: Iterator<Item = Token>> TokenIter<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        TokenIter {
            iter: tokens.into_iter(),
            consumed: 0,
        }
    }
}

impl<I: Iterator<Item = Token>> TokenSource for TokenIter<I> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let tok = self.iter.next();
        if tok.is_some() {
            self.consumed += 1;
        }
        Ok(tok)
    }

    fn offset(&self) -> u64 {
        self.consumed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the lexer will accept next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// A top-level value (or end of input).
    Value,
    /// Just after `[`: an element or `]`.
    ArrayStart,
    /// Just after `,` in an array: an element.
    ArrayValue,
    /// After an element: `,` or `]`.
    ArrayComma,
    /// Just after `{`: a key or `}`.
    ObjectStart,
    /// Just after `,` in an object: a key.
    ObjectKey,
    /// After a key: `:`.
    ObjectColon,
    /// After `:`: a value.
    ObjectValue,
    /// After a member value: `,` or `}`.
    ObjectComma,
}

/// Pull tokenizer over a byte source.
pub struct Lexer<R> {
    reader: BufReader<R>,
    offset: u64,
    stack: Vec<Container>,
    state: State,
}

impl<'a> Lexer<&'a [u8]> {
    /// Tokenize an in-memory buffer.
    pub fn from_slice(input: &'a [u8]) -> Self {
        Lexer::new(input)
    }
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer {
            reader: BufReader::new(reader),
            offset: 0,
            stack: Vec::new(),
            state: State::Value,
        }
    }

    /// Number of input bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.offset
    }

    /// Current nesting depth (0 at top level).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn bump(&mut self) {
        self.reader.consume(1);
        self.offset += 1;
    }

    /// Consume and return the next byte, failing at end of input.
    fn next_byte(&mut self) -> Result<u8> {
        match self.peek()? {
            Some(b) => {
                self.bump();
                Ok(b)
            }
            None => Err(self.unexpected_eof()),
        }
    }

    fn unexpected_eof(&self) -> JsonomError {
        JsonomError::syntax(self.offset, "unexpected end of input")
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek()? {
            self.bump();
        }
        Ok(())
    }

    /// Move to the state that follows a complete value at the current depth.
    fn value_done(&mut self) {
        self.state = match self.stack.last() {
            None => State::Value,
            Some(Container::Array) => State::ArrayComma,
            Some(Container::Object) => State::ObjectComma,
        };
    }

    fn close(&mut self, token: Token) -> Token {
        self.stack.pop();
        self.value_done();
        token
    }

    /// Read the next token.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            self.skip_whitespace()?;
            let Some(b) = self.peek()? else {
                if self.stack.is_empty() {
                    return Ok(None);
                }
                return Err(self.unexpected_eof());
            };

            match (self.state, b) {
                (State::ArrayComma, b',') => {
                    self.bump();
                    self.state = State::ArrayValue;
                }
                (State::ObjectComma, b',') => {
                    self.bump();
                    self.state = State::ObjectKey;
                }
                (State::ObjectColon, b':') => {
                    self.bump();
                    self.state = State::ObjectValue;
                }
                (State::ArrayStart | State::ArrayComma, b']') => {
                    self.bump();
                    return Ok(Some(self.close(Token::EndArray)));
                }
                (State::ObjectStart | State::ObjectComma, b'}') => {
                    self.bump();
                    return Ok(Some(self.close(Token::EndObject)));
                }
                (State::ObjectStart | State::ObjectKey, b'"') => {
                    self.bump();
                    let key = self.read_string()?;
                    self.state = State::ObjectColon;
                    return Ok(Some(Token::String(key)));
                }
                (State::Value | State::ArrayStart | State::ArrayValue | State::ObjectValue, _) => {
                    return self.read_value(b).map(Some);
                }
                (state, b) => {
                    return Err(JsonomError::syntax(
                        self.offset,
                        format!("unexpected {} {}", describe(b), expectation(state)),
                    ));
                }
            }
        }
    }

    fn read_value(&mut self, first: u8) -> Result<Token> {
        let token = match first {
            b'{' => {
                self.bump();
                self.stack.push(Container::Object);
                self.state = State::ObjectStart;
                return Ok(Token::BeginObject);
            }
            b'[' => {
                self.bump();
                self.stack.push(Container::Array);
                self.state = State::ArrayStart;
                return Ok(Token::BeginArray);
            }
            b'"' => {
                self.bump();
                Token::String(self.read_string()?)
            }
            b'-' | b'0'..=b'9' => Token::Number(self.read_number()?),
            b't' => {
                self.read_literal(b"true")?;
                Token::Bool(true)
            }
            b'f' => {
                self.read_literal(b"false")?;
                Token::Bool(false)
            }
            b'n' => {
                self.read_literal(b"null")?;
                Token::Null
            }
            other => {
                return Err(JsonomError::syntax(
                    self.offset,
                    format!("unexpected {} {}", describe(other), expectation(self.state)),
                ));
            }
        };
        self.value_done();
        Ok(token)
    }

    fn read_literal(&mut self, word: &'static [u8]) -> Result<()> {
        for &expected in word {
            match self.peek()? {
                Some(b) if b == expected => self.bump(),
                Some(b) => {
                    return Err(JsonomError::syntax(
                        self.offset,
                        format!("unexpected {} in literal", describe(b)),
                    ));
                }
                None => return Err(self.unexpected_eof()),
            }
        }
        Ok(())
    }

    fn read_number(&mut self) -> Result<Number> {
        let start = self.offset;
        let mut text = String::new();
        while let Some(b @ (b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')) = self.peek()? {
            text.push(b as char);
            self.bump();
        }
        match invalid_number_at(&text) {
            None => Ok(Number::from_validated(text)),
            Some(at) => Err(JsonomError::syntax(
                start + at as u64,
                format!("invalid number literal {text:?}"),
            )),
        }
    }

    /// Read a string body; the opening quote is already consumed.
    fn read_string(&mut self) -> Result<String> {
        let start = self.offset - 1;
        let mut buf: Vec<u8> = Vec::new();
        loop {
            let b = self.next_byte()?;
            match b {
                b'"' => break,
                b'\\' => self.read_escape(&mut buf)?,
                0x00..=0x1f => {
                    return Err(JsonomError::syntax(
                        self.offset - 1,
                        "control character in string",
                    ));
                }
                _ => buf.push(b),
            }
        }
        String::from_utf8(buf)
            .map_err(|_| JsonomError::syntax(start, "string is not valid UTF-8"))
    }

    fn read_escape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let at = self.offset - 1;
        let simple = match self.next_byte()? {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                let ch = self.read_unicode_escape(at)?;
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                return Ok(());
            }
            other => {
                return Err(JsonomError::syntax(
                    at,
                    format!("invalid escape {}", describe(other)),
                ));
            }
        };
        buf.push(simple);
        Ok(())
    }

    /// Decode the code point of a `\u` escape (the `\u` is consumed),
    /// combining a surrogate pair when one follows.
    fn read_unicode_escape(&mut self, at: u64) -> Result<char> {
        let first = self.read_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if self.next_byte()? != b'\\' || self.next_byte()? != b'u' {
                    return Err(JsonomError::syntax(at, "unpaired surrogate in \\u escape"));
                }
                let second = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(JsonomError::syntax(at, "unpaired surrogate in \\u escape"));
                }
                0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(JsonomError::syntax(at, "unpaired surrogate in \\u escape"));
            }
            cp => u32::from(cp),
        };
        char::from_u32(code).ok_or_else(|| JsonomError::syntax(at, "invalid \\u escape"))
    }

    fn read_hex4(&mut self) -> Result<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let b = self.next_byte()?;
            let digit = (b as char).to_digit(16).ok_or_else(|| {
                JsonomError::syntax(
                    self.offset - 1,
                    format!("invalid hex digit {} in \\u escape", describe(b)),
                )
            })?;
            value = value * 16 + digit as u16;
        }
        Ok(value)
    }
}

impl<R: Read> TokenSource for Lexer<R> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        Lexer::next_token(self)
    }

    fn offset(&self) -> u64 {
        self.offset
    }
}

fn describe(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("'{}'", b as char)
    } else {
        format!("byte 0x{b:02x}")
    }
}

fn expectation(state: State) -> &'static str {
    match state {
        State::Value | State::ArrayValue | State::ObjectValue => "while looking for a value",
        State::ArrayStart => "while looking for an array element or ']'",
        State::ArrayComma => "after array element",
        State::ObjectStart => "while looking for an object key or '}'",
        State::ObjectKey => "while looking for an object key",
        State::ObjectColon => "after object key",
        State::ObjectComma => "after object member",
    }
}
