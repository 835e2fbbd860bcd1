//! Error type shared by the tokenizers, parsers and the reader.

use crate::token::Kind;

#[derive(Debug, thiserror::Error)]
pub enum RoffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected file type.")]
    UnexpectedFileType,

    #[error("Tokenize error at offset {offset}: {reason}")]
    Tokenize { offset: u64, reason: String },

    #[error("Unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: u64 },

    #[error("Array '{name}' declares {expected} elements but only {found} were found")]
    ArrayTooShort {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid array length: {0}")]
    InvalidArrayLength(i64),

    #[error("Unsupported endianness (filedata.byteswaptest = {0})")]
    UnsupportedEndianness(String),

    #[error("Invalid numeric value '{text}' at offset {offset}")]
    InvalidNumber { offset: u64, text: String },

    #[error("Kind '{0}' has no fixed binary width")]
    UnsupportedKind(Kind),

    #[error("Unexpected token at index {index}: expected {expected}, found {found}")]
    UnexpectedToken {
        index: usize,
        expected: &'static str,
        found: Kind,
    },

    #[error("Token sequence ended unexpectedly")]
    UnexpectedEndOfTokens,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Array '{name}' holds {found} values, not {expected}")]
    ArrayTypeMismatch {
        name: String,
        expected: Kind,
        found: Kind,
    },
}

impl RoffError {
    pub(crate) fn tokenize(offset: u64, reason: impl Into<String>) -> Self {
        Self::Tokenize {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RoffError>;
