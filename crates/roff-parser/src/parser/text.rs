use std::io::{Read, Seek};
use std::str::FromStr;

use super::{ArrayDescriptor, Parser, payload, read_span};
use crate::error::{Result, RoffError};
use crate::token::Token;

/// Decodes token spans of a `roff-asc` document.
///
/// Every value is ASCII text, one token per element, so arrays are decoded
/// by parsing each element token in turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextParser;

impl TextParser {
    fn parse_number<T: FromStr, R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<T> {
        let text = self.parse_string(token, stream)?;
        text.trim().parse().map_err(|_| RoffError::InvalidNumber {
            offset: token.start(),
            text,
        })
    }

    fn parse_each<T, R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
        decode: impl Fn(&Self, &Token, &mut R) -> Result<T>,
    ) -> Result<Vec<T>> {
        payload(tokens, array)?
            .iter()
            .map(|token| decode(self, token, stream))
            .collect()
    }
}

impl Parser for TextParser {
    fn parse_string<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<String> {
        let bytes = read_span(token, stream)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn parse_int<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<i32> {
        self.parse_number(token, stream)
    }

    fn parse_float<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f32> {
        self.parse_number(token, stream)
    }

    fn parse_double<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f64> {
        self.parse_number(token, stream)
    }

    fn parse_bool<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<bool> {
        Ok(self.parse_int(token, stream)? != 0)
    }

    fn parse_byte<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<u8> {
        let value = self.parse_int(token, stream)?;
        u8::try_from(value).map_err(|_| RoffError::InvalidNumber {
            offset: token.start(),
            text: value.to_string(),
        })
    }

    fn parse_int_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<i32>> {
        self.parse_each(tokens, stream, array, Self::parse_int)
    }

    fn parse_float_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f32>> {
        self.parse_each(tokens, stream, array, Self::parse_float)
    }

    fn parse_double_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f64>> {
        self.parse_each(tokens, stream, array, Self::parse_double)
    }

    fn parse_byte_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<u8>> {
        self.parse_each(tokens, stream, array, Self::parse_byte)
    }

    fn parse_bool_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<bool>> {
        self.parse_each(tokens, stream, array, Self::parse_bool)
    }
}
