//! Tokenizer for `roff-asc` documents.
//!
//! Tokens are separated by ASCII whitespace. Names and keywords are runs of
//! non-whitespace bytes, strings are double-quoted and numbers follow
//! `[-+]?digits[.digits][(e|E)[-+]digits]`.

use std::io::{Read, Seek};

use crate::error::{Result, RoffError};
use crate::parser::{Parser, TextParser};
use crate::stream::{position, read_byte, seek_to};
use crate::token::{Kind, Token};
use crate::tokenizer::{Tokenizer, array_length};

#[derive(Debug, Default, Clone, Copy)]
pub struct TextTokenizer;

impl TextTokenizer {
    /// A numeric literal at the cursor, `None` (cursor restored) if there is none.
    pub fn tokenize_number<R: Read + Seek>(&self, stream: &mut R) -> Result<Option<Token>> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;

        let mut candidate = Vec::new();
        while let Some(byte) = read_byte(stream)? {
            if !is_numeric_byte(byte) {
                break;
            }
            candidate.push(byte);
        }

        let len = numeric_prefix_len(&candidate) as u64;
        seek_to(stream, start + len)?;
        if len == 0 {
            return Ok(None);
        }
        Ok(Some(Token::new(Kind::NumericValue, start, start + len)))
    }

    /// A number, or failing that a string.
    pub fn tokenize_literal<R: Read + Seek>(&self, stream: &mut R) -> Result<Option<Token>> {
        match self.tokenize_number(stream)? {
            Some(token) => Ok(Some(token)),
            None => self.tokenize_string(stream),
        }
    }

    /// Exactly `count` literals; the declared count is authoritative.
    pub fn tokenize_array_data<R: Read + Seek>(
        &self,
        stream: &mut R,
        name: &str,
        count: usize,
    ) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while tokens.len() < count {
            match self.tokenize_literal(stream)? {
                Some(token) => tokens.push(token),
                None => {
                    return Err(RoffError::ArrayTooShort {
                        name: name.to_string(),
                        expected: count,
                        found: tokens.len(),
                    });
                }
            }
        }
        Ok(tokens)
    }

    /// Length of the run of non-whitespace bytes at the cursor, capped at `limit`.
    fn word_len<R: Read + Seek>(&self, stream: &mut R, limit: usize) -> Result<u64> {
        let start = position(stream)?;
        let mut len = 0u64;
        while (len as usize) < limit {
            match read_byte(stream)? {
                Some(byte) if !byte.is_ascii_whitespace() => len += 1,
                _ => break,
            }
        }
        seek_to(stream, start)?;
        Ok(len)
    }
}

impl Tokenizer for TextTokenizer {
    const FILE_KIND: Kind = Kind::RoffAsc;

    fn tokenize_space<R: Read + Seek>(&self, stream: &mut R) -> Result<bool> {
        let start = position(stream)?;
        let mut skipped = 0u64;
        while let Some(byte) = read_byte(stream)? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            skipped += 1;
        }
        seek_to(stream, start + skipped)?;
        Ok(skipped > 0)
    }

    fn tokenize_string<R: Read + Seek>(&self, stream: &mut R) -> Result<Option<Token>> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;
        if read_byte(stream)? != Some(b'"') {
            seek_to(stream, start)?;
            return Ok(None);
        }

        let content = start + 1;
        let mut end = content;
        loop {
            match read_byte(stream)? {
                Some(b'"') => return Ok(Some(Token::new(Kind::StringLiteral, content, end))),
                Some(_) => end += 1,
                None => {
                    seek_to(stream, start)?;
                    return Ok(None);
                }
            }
        }
    }

    fn tokenize_name<R: Read + Seek>(&self, stream: &mut R) -> Result<Token> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;
        let len = self.word_len(stream, usize::MAX)?;
        if len == 0 {
            return Err(RoffError::tokenize(start, "could not tokenize name"));
        }
        seek_to(stream, start + len)?;
        Ok(Token::new(Kind::Name, start, start + len))
    }

    fn tokenize_word<R: Read + Seek>(
        &self,
        stream: &mut R,
        keyword: &str,
        kind: Kind,
    ) -> Result<Option<Token>> {
        self.tokenize_delimiter(stream)?;
        let start = position(stream)?;

        // One byte past the keyword is enough to reject longer words.
        let len = self.word_len(stream, keyword.len() + 1)?;
        if len as usize != keyword.len() {
            return Ok(None);
        }
        let mut word = vec![0u8; keyword.len()];
        stream.read_exact(&mut word)?;
        if word != keyword.as_bytes() {
            seek_to(stream, start)?;
            return Ok(None);
        }
        Ok(Some(Token::new(kind, start, start + len)))
    }

    fn tokenize_value<R: Read + Seek>(&self, stream: &mut R, _kind: Kind) -> Result<Token> {
        match self.tokenize_literal(stream)? {
            Some(token) => Ok(token),
            None => {
                let offset = position(stream)?;
                Err(RoffError::tokenize(offset, "invalid value"))
            }
        }
    }

    fn tokenize_array_tag_key<R: Read + Seek>(&self, stream: &mut R) -> Result<Vec<Token>> {
        let mut tokens = vec![self.tokenize_keyword(stream, &[Kind::Array])?];
        tokens.push(self.tokenize_simple_type(stream)?);
        let name = self.tokenize_name(stream)?;
        tokens.push(name);

        let count_token = match self.tokenize_number(stream)? {
            Some(token) => token,
            None => {
                let offset = position(stream)?;
                return Err(RoffError::tokenize(offset, "expected numeric array length"));
            }
        };
        tokens.push(count_token);

        // Decoding seeks back into the spans, so restore the cursor afterwards.
        let resume = position(stream)?;
        let count = array_length(TextParser.parse_int(&count_token, stream)?)?;
        let name = TextParser.parse_string(&name, stream)?;
        seek_to(stream, resume)?;

        tokens.extend(self.tokenize_array_data(stream, &name, count)?);
        Ok(tokens)
    }
}

fn is_numeric_byte(byte: u8) -> bool {
    byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the longest prefix of `bytes` that is a well-formed number.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    // A number starts with a digit once the sign is taken off.
    let int_digits = count_digits(&bytes[i..]);
    if int_digits == 0 {
        return 0;
    }
    i += int_digits;

    if bytes.get(i) == Some(&b'.') {
        i += 1 + count_digits(&bytes[i + 1..]);
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}
