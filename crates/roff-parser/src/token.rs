//! Token model: classified byte spans in the source stream.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoffError};

//  Kind

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    RoffAsc,
    RoffBin,
    Tag,
    EndTag,
    StringLiteral,
    NumericValue,
    BinaryNumericValue,
    Name,
    Char,
    Bool,
    Byte,
    Int,
    Float,
    Double,
    Array,
    ArrayBlob,
}

/// The six kinds that can be decoded as a single scalar, in keyword order.
pub const SIMPLE_TYPES: [Kind; 6] = [
    Kind::Char,
    Kind::Bool,
    Kind::Byte,
    Kind::Int,
    Kind::Float,
    Kind::Double,
];

impl Kind {
    pub fn is_simple_type(self) -> bool {
        SIMPLE_TYPES.contains(&self)
    }

    /// Fixed wire width of a binary simple type.
    ///
    /// `char` values are NUL-terminated and every non-type kind is a
    /// structural marker, so both are rejected.
    pub fn binary_size_in_bytes(self) -> Result<usize> {
        match self {
            Self::Bool | Self::Byte => Ok(1),
            Self::Int | Self::Float => Ok(4),
            Self::Double => Ok(8),
            other => Err(RoffError::UnsupportedKind(other)),
        }
    }

    /// Literal keyword spelling, for kinds that are keywords.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::RoffAsc => Some("roff-asc"),
            Self::RoffBin => Some("roff-bin"),
            Self::Tag => Some("tag"),
            Self::EndTag => Some("endtag"),
            Self::Char => Some("char"),
            Self::Bool => Some("bool"),
            Self::Byte => Some("byte"),
            Self::Int => Some("int"),
            Self::Float => Some("float"),
            Self::Double => Some("double"),
            Self::Array => Some("array"),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StringLiteral => "string",
            Self::NumericValue => "number",
            Self::BinaryNumericValue => "binary number",
            Self::Name => "name",
            Self::ArrayBlob => "array-blob",
            keyword => keyword.keyword().unwrap_or_default(),
        };
        f.pad(name)
    }
}

//  Token

/// A classified byte span `[start, end)` in the source stream.
///
/// Tokens never hold decoded data; parsers seek back to the span when a
/// value is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: Kind,
    start: u64,
    end: u64,
}

impl Token {
    /// Panics if `start > end`.
    pub fn new(kind: Kind, start: u64, end: u64) -> Self {
        assert!(
            start <= end,
            "token span start {start} is past its end {end}"
        );
        Self { kind, start, end }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
