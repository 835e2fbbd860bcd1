//! Tokenizer for `roff-bin` documents.
//!
//! Keywords, names and strings are NUL-terminated, numbers are fixed-width
//! little-endian values with no terminator. A fixed-width array payload is
//! one [`Kind::ArrayBlob`] token covering `count * width` bytes.

use std::io::{Read, Seek};

use crate::error::{Result, RoffError};
use crate::parser::{BinaryParser, Parser};
use crate::stream::{advance, position, read_byte, seek_to};
use crate::token::{Kind, Token};
use crate::tokenizer::{Tokenizer, array_length};

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryTokenizer;

impl BinaryTokenizer {
    /// A fixed-width value of `kind`, read at the cursor without skipping padding.
    pub fn tokenize_number<R: Read + Seek>(&self, stream: &mut R, kind: Kind) -> Result<Token> {
        let width = kind.binary_size_in_bytes()? as u64;
        let start = position(stream)?;
        let end = advance(stream, width)?;
        Ok(Token::new(Kind::BinaryNumericValue, start, end))
    }

    /// Array payload: one string token per element for `char`, one blob otherwise.
    pub fn tokenize_array_data<R: Read + Seek>(
        &self,
        stream: &mut R,
        count: usize,
        kind: Kind,
    ) -> Result<Vec<Token>> {
        if kind == Kind::Char {
            let mut tokens = Vec::new();
            for _ in 0..count {
                tokens.push(self.tokenize_terminated(stream, Kind::StringLiteral)?);
            }
            return Ok(tokens);
        }

        let width = kind.binary_size_in_bytes()? as u64;
        let start = position(stream)?;
        let end = advance(stream, count as u64 * width)?;
        Ok(vec![Token::new(Kind::ArrayBlob, start, end)])
    }

    /// Bytes up to the next NUL, which is consumed but not part of the span.
    fn tokenize_terminated<R: Read + Seek>(&self, stream: &mut R, kind: Kind) -> Result<Token> {
        let start = position(stream)?;
        let mut end = start;
        loop {
            match read_byte(stream)? {
                Some(0) => return Ok(Token::new(kind, start, end)),
                Some(_) => end += 1,
                None => {
                    seek_to(stream, start)?;
                    return Err(RoffError::UnexpectedEof { offset: end });
                }
            }
        }
    }
}

impl Tokenizer for BinaryTokenizer {
    const FILE_KIND: Kind = Kind::RoffBin;

    fn tokenize_space<R: Read + Seek>(&self, stream: &mut R) -> Result<bool> {
        let start = position(stream)?;
        let mut skipped = 0u64;
        while read_byte(stream)? == Some(0) {
            skipped += 1;
        }
        seek_to(stream, start + skipped)?;
        Ok(skipped > 0)
    }

    /// String values may be empty, so no padding is skipped first.
    fn tokenize_string<R: Read + Seek>(&self, stream: &mut R) -> Result<Option<Token>> {
        self.tokenize_terminated(stream, Kind::StringLiteral).map(Some)
    }

    fn tokenize_name<R: Read + Seek>(&self, stream: &mut R) -> Result<Token> {
        self.tokenize_delimiter(stream)?;
        self.tokenize_terminated(stream, Kind::Name)
    }

    fn tokenize_word<R: Read + Seek>(
        &self,
        stream: &mut R,
        keyword: &str,
        kind: Kind,
    ) -> Result<Option<Token>> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;

        let mut word = Vec::with_capacity(keyword.len());
        while word.len() < keyword.len() {
            match read_byte(stream)? {
                Some(byte) => word.push(byte),
                None => break,
            }
        }

        // A keyword ends at a NUL or at the end of input.
        let end = start + keyword.len() as u64;
        let matched = word == keyword.as_bytes();
        if !matched || !matches!(read_byte(stream)?, None | Some(0)) {
            seek_to(stream, start)?;
            return Ok(None);
        }
        seek_to(stream, end)?;
        Ok(Some(Token::new(kind, start, end)))
    }

    fn tokenize_value<R: Read + Seek>(&self, stream: &mut R, kind: Kind) -> Result<Token> {
        match kind {
            Kind::Char => self.tokenize_terminated(stream, Kind::StringLiteral),
            _ => self.tokenize_number(stream, kind),
        }
    }

    fn tokenize_array_tag_key<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>> {
        let mut tokens = vec![self.tokenize_keyword(stream, &[Kind::Array])?];
        let element = self.tokenize_simple_type(stream)?;
        tokens.push(element);
        tokens.push(self.tokenize_name(stream)?);

        let count_token = self.tokenize_number(stream, Kind::Int)?;
        tokens.push(count_token);
        let count = array_length(BinaryParser.parse_int(&count_token, stream)?)?;

        tokens.extend(self.tokenize_array_data(stream, count, element.kind())?);
        Ok(tokens)
    }
}
