//! Tokenizers for the two ROFF encodings.
//!
//! Both encodings share one document grammar:
//!
//! ```text
//! document  := file-type tag-group*
//! tag-group := "tag" NAME tag-key* "endtag"
//! tag-key   := simple-type NAME value
//!            | "array" simple-type NAME count payload
//! ```
//!
//! The grammar lives in the provided methods of [`Tokenizer`]; the two
//! implementations only say how a space, a keyword, a name, a string and a
//! value look on the wire. Tokens carry byte spans, never decoded values.

mod binary;
mod text;

use std::fmt;
use std::io::{Read, Seek};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, RoffError};
use crate::stream::{at_end, position, read_byte, seek_to};
use crate::token::{Kind, SIMPLE_TYPES, Token};

pub use binary::BinaryTokenizer;
pub use text::TextTokenizer;

const FILE_TYPES: [Kind; 2] = [Kind::RoffBin, Kind::RoffAsc];

const TAG_KEYS: [Kind; 8] = [
    Kind::EndTag,
    Kind::Array,
    Kind::Char,
    Kind::Bool,
    Kind::Byte,
    Kind::Int,
    Kind::Float,
    Kind::Double,
];

/// Encoding of a ROFF document, decided by its first keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Binary,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("roff-asc"),
            Self::Binary => f.write_str("roff-bin"),
        }
    }
}

pub trait Tokenizer {
    /// File-type keyword this tokenizer accepts.
    const FILE_KIND: Kind;

    /// Skip one run of inter-token padding. Returns whether anything was skipped.
    fn tokenize_space<R: Read + Seek>(&self, stream: &mut R) -> Result<bool>;

    fn tokenize_string<R: Read + Seek>(&self, stream: &mut R) -> Result<Option<Token>>;

    fn tokenize_name<R: Read + Seek>(&self, stream: &mut R) -> Result<Token>;

    /// Match `keyword` at the cursor; on a miss the cursor is restored.
    fn tokenize_word<R: Read + Seek>(
        &self,
        stream: &mut R,
        keyword: &str,
        kind: Kind,
    ) -> Result<Option<Token>>;

    /// The value that follows a simple-type field's name.
    fn tokenize_value<R: Read + Seek>(&self, stream: &mut R, kind: Kind) -> Result<Token>;

    fn tokenize_array_tag_key<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>>;

    /// Skip a `#...#` comment. An unterminated comment is left in place.
    fn tokenize_comment<R: Read + Seek>(&self, stream: &mut R) -> Result<bool> {
        let start = position(stream)?;
        if read_byte(stream)? != Some(b'#') {
            seek_to(stream, start)?;
            return Ok(false);
        }
        loop {
            match read_byte(stream)? {
                Some(b'#') => return Ok(true),
                Some(_) => {}
                None => {
                    seek_to(stream, start)?;
                    return Ok(false);
                }
            }
        }
    }

    fn tokenize_delimiter<R: Read + Seek>(&self, stream: &mut R) -> Result<()> {
        loop {
            let space = self.tokenize_space(stream)?;
            let comment = self.tokenize_comment(stream)?;
            if !space && !comment {
                return Ok(());
            }
        }
    }

    /// First keyword of `kinds` found at the cursor.
    fn tokenize_keyword<R: Read + Seek>(&self, stream: &mut R, kinds: &[Kind]) -> Result<Token> {
        for &kind in kinds {
            let Some(keyword) = kind.keyword() else {
                continue;
            };
            if let Some(token) = self.tokenize_word(stream, keyword, kind)? {
                return Ok(token);
            }
        }

        let offset = position(stream)?;
        let expected: Vec<String> = kinds.iter().map(Kind::to_string).collect();
        Err(RoffError::tokenize(
            offset,
            format!("expected one of: {}", expected.join(", ")),
        ))
    }

    fn tokenize_simple_type<R: Read + Seek>(&self, stream: &mut R) -> Result<Token> {
        self.tokenize_keyword(stream, &SIMPLE_TYPES)
    }

    fn tokenize_file_type<R: Read + Seek>(&self, stream: &mut R) -> Result<Token> {
        self.tokenize_keyword(stream, &FILE_TYPES)
            .map_err(|_| RoffError::UnexpectedFileType)
    }

    /// One entry inside a tag group: a scalar field, an array, or `endtag`.
    fn tokenize_tag_key<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;
        if at_end(stream)? {
            return Err(RoffError::UnexpectedEof { offset: start });
        }

        let keyword = self.tokenize_keyword(stream, &TAG_KEYS)?;
        match keyword.kind() {
            Kind::Array => {
                seek_to(stream, start)?;
                self.tokenize_array_tag_key(stream)
            }
            Kind::EndTag => Ok(vec![keyword]),
            kind => {
                let name = self.tokenize_name(stream)?;
                let value = self.tokenize_value(stream, kind)?;
                Ok(vec![keyword, name, value])
            }
        }
    }

    fn tokenize_tag_group<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>> {
        let mut tokens = vec![self.tokenize_keyword(stream, &[Kind::Tag])?];
        tokens.push(self.tokenize_name(stream)?);

        loop {
            let key = self.tokenize_tag_key(stream)?;
            let closed = key.first().map(Token::kind) == Some(Kind::EndTag);
            tokens.extend(key);
            if closed {
                return Ok(tokens);
            }
        }
    }

    /// Tokenize a whole document from the cursor to the end of input.
    fn tokenize_stream<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>> {
        let file_type = self.tokenize_file_type(stream)?;
        if file_type.kind() != Self::FILE_KIND {
            return Err(RoffError::UnexpectedFileType);
        }

        let mut tokens = vec![file_type];
        loop {
            self.tokenize_delimiter(stream)?;
            if at_end(stream)? {
                return Ok(tokens);
            }
            let group = self.tokenize_tag_group(stream)?;
            trace!(
                start = group[0].start(),
                tokens = group.len(),
                "tokenized tag group"
            );
            tokens.extend(group);
        }
    }
}

/// Detect the encoding from the first word and rewind to the start.
///
/// Leading NUL or whitespace padding is skipped. The word then runs up to the
/// next NUL, whitespace byte or the end of input.
pub fn detect_file_type<R: Read + Seek>(stream: &mut R) -> Result<FileFormat> {
    let word = seek_to(stream, 0)
        .and_then(|()| first_word(stream))
        .map_err(|_| RoffError::UnexpectedFileType)?;
    seek_to(stream, 0)?;

    match word.as_slice() {
        b"roff-bin" => Ok(FileFormat::Binary),
        b"roff-asc" => Ok(FileFormat::Text),
        _ => Err(RoffError::UnexpectedFileType),
    }
}

fn first_word<R: Read + Seek>(stream: &mut R) -> Result<Vec<u8>> {
    // One byte past the longest file-type keyword is enough to reject.
    const LIMIT: usize = 9;
    let is_padding = |byte: u8| byte == 0 || byte.is_ascii_whitespace();
    let mut word = Vec::with_capacity(LIMIT);
    while word.len() < LIMIT {
        match read_byte(stream)? {
            None => break,
            Some(byte) if is_padding(byte) && word.is_empty() => {}
            Some(byte) if is_padding(byte) => break,
            Some(byte) => word.push(byte),
        }
    }
    Ok(word)
}

/// Validate a decoded array count.
pub(crate) fn array_length(count: i32) -> Result<usize> {
    usize::try_from(count).map_err(|_| RoffError::InvalidArrayLength(i64::from(count)))
}
