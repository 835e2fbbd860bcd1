use std::io::{Read, Seek};

use super::{ArrayDescriptor, Parser, read_span, token_at};
use crate::error::{Result, RoffError};
use crate::stream::read_exact_at;
use crate::token::{Kind, Token};

/// Decodes token spans of a `roff-bin` document (little-endian only).
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryParser;

impl BinaryParser {
    fn read_fixed<const N: usize, R: Read + Seek>(
        &self,
        token: &Token,
        stream: &mut R,
    ) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        read_exact_at(stream, token.start(), &mut buf)?;
        Ok(buf)
    }

    /// The whole payload of a fixed-width array as one contiguous read.
    fn read_blob<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<u8>> {
        if array.length == 0 {
            return Ok(Vec::new());
        }
        let width = array.element_kind.binary_size_in_bytes()?;
        let blob = token_at(tokens, array.start_index, "array payload", |k| {
            matches!(k, Kind::ArrayBlob | Kind::BinaryNumericValue)
        })?;

        let size = array
            .length
            .checked_mul(width)
            .ok_or(RoffError::InvalidArrayLength(array.length as i64))?;
        let mut buf = vec![0u8; size];
        read_exact_at(stream, blob.start(), &mut buf)?;
        Ok(buf)
    }

    fn decode_blob<const N: usize, T, R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
        decode: fn([u8; N]) -> T,
    ) -> Result<Vec<T>> {
        let blob = self.read_blob(tokens, stream, array)?;
        Ok(blob
            .chunks_exact(N)
            .map(|chunk| {
                let mut bytes = [0u8; N];
                bytes.copy_from_slice(chunk);
                decode(bytes)
            })
            .collect())
    }
}

impl Parser for BinaryParser {
    fn parse_string<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<String> {
        let bytes = read_span(token, stream)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn parse_int<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_fixed(token, stream)?))
    }

    fn parse_float<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_fixed(token, stream)?))
    }

    fn parse_double<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_fixed(token, stream)?))
    }

    fn parse_bool<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<bool> {
        let [byte] = self.read_fixed::<1, _>(token, stream)?;
        Ok(byte != 0)
    }

    fn parse_byte<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<u8> {
        let [byte] = self.read_fixed::<1, _>(token, stream)?;
        Ok(byte)
    }

    fn parse_int_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<i32>> {
        self.decode_blob::<4, _, _>(tokens, stream, array, i32::from_le_bytes)
    }

    fn parse_float_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f32>> {
        self.decode_blob::<4, _, _>(tokens, stream, array, f32::from_le_bytes)
    }

    fn parse_double_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f64>> {
        self.decode_blob::<8, _, _>(tokens, stream, array, f64::from_le_bytes)
    }

    fn parse_byte_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<u8>> {
        self.read_blob(tokens, stream, array)
    }

    fn parse_bool_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<bool>> {
        let blob = self.read_blob(tokens, stream, array)?;
        Ok(blob.into_iter().map(|b| b != 0).collect())
    }
}
