//! Error types for decoding JSON into the object model.

use thiserror::Error;

/// Errors that can occur while decoding a JSON document.
///
/// Encoding does not use this type: encode functions return the sink's own
/// `std::io::Error` untouched.
#[derive(Error, Debug)]
pub enum JsonomError {
    /// The input was malformed or ended early. `offset` is the byte offset
    /// in the input where the problem was detected.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: u64, message: String },

    /// Reading from the decode source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonomError {
    pub(crate) fn syntax(offset: u64, message: impl Into<String>) -> Self {
        JsonomError::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset of a syntax error, `None` for I/O failures.
    pub fn offset(&self) -> Option<u64> {
        match self {
            JsonomError::Syntax { offset, .. } => Some(*offset),
            JsonomError::Io(_) => None,
        }
    }
}

/// Convenience alias used throughout jsonom-core.
pub type Result<T> = std::result::Result<T, JsonomError>;
