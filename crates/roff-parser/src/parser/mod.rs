//! Decoders for token spans and the structural pass over a token sequence.
//!
//! The structural pass walks the tokens once and builds two things: the
//! ordered list of named scalars (decoded immediately, they are small) and
//! a directory of named arrays that only records where each payload starts.
//! Array values are decoded later, on request, by the `parse_*_array`
//! methods.

mod binary;
mod text;

use std::io::{Read, Seek};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, RoffError};
use crate::stream::read_exact_at;
use crate::token::{Kind, Token};
use crate::tokenizer::array_length;
use crate::value::RoffScalar;

pub use binary::BinaryParser;
pub use text::TextParser;

/// Scalar that must equal `1` for a document to be readable.
pub const BYTESWAP_TEST: &str = "filedata.byteswaptest";

/// Scalar naming the property held by the enclosing `parameter` group.
pub const PARAMETER_NAME: &str = "parameter.name";

pub const DATA_SUFFIX: &str = ".data";
pub const CODE_NAMES_SUFFIX: &str = ".codeNames";
pub const CODE_VALUES_SUFFIX: &str = ".codeValues";

const PARAMETER_GROUP: &str = "parameter";

/// Where an array's payload lives in the token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayDescriptor {
    pub element_kind: Kind,
    pub start_index: usize,
    pub length: usize,
}

/// Output of the structural pass.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Scalars in document order; duplicate names are kept.
    pub scalars: Vec<(String, RoffScalar)>,
    /// Arrays in document order, keyed by their (de-aliased) name.
    pub arrays: IndexMap<String, ArrayDescriptor>,
}

impl ParseResult {
    pub fn array_types(&self) -> Vec<(String, Kind)> {
        self.arrays
            .iter()
            .map(|(name, array)| (name.clone(), array.element_kind))
            .collect()
    }
}

pub trait Parser {
    fn parse_string<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<String>;
    fn parse_int<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<i32>;
    fn parse_float<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f32>;
    fn parse_double<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<f64>;
    fn parse_bool<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<bool>;
    fn parse_byte<R: Read + Seek>(&self, token: &Token, stream: &mut R) -> Result<u8>;

    fn parse_int_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<i32>>;

    fn parse_float_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f32>>;

    fn parse_double_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<f64>>;

    fn parse_byte_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<u8>>;

    fn parse_bool_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<bool>>;

    /// Strings are variable-width in both encodings: one token per element.
    fn parse_string_array<R: Read + Seek>(
        &self,
        tokens: &[Token],
        stream: &mut R,
        array: &ArrayDescriptor,
    ) -> Result<Vec<String>> {
        payload(tokens, array)?
            .iter()
            .map(|token| self.parse_string(token, stream))
            .collect()
    }

    /// Decode the `(scoped name, value)` of the simple-type field at `index`.
    fn parse_simple_type<R: Read + Seek>(
        &self,
        tokens: &[Token],
        index: usize,
        tag_group: &str,
        stream: &mut R,
    ) -> Result<(String, RoffScalar)> {
        let kind = token_at(tokens, index, "simple type", Kind::is_simple_type)?.kind();
        let name = token_at(tokens, index + 1, "name", |k| k == Kind::Name)?;
        let value = tokens
            .get(index + 2)
            .ok_or(RoffError::UnexpectedEndOfTokens)?;

        let name = format!("{tag_group}.{}", self.parse_string(name, stream)?);
        let value = match kind {
            Kind::Int => RoffScalar::Int(self.parse_int(value, stream)?),
            Kind::Bool => RoffScalar::Bool(self.parse_bool(value, stream)?),
            Kind::Byte => RoffScalar::Byte(self.parse_byte(value, stream)?),
            Kind::Float => RoffScalar::Float(self.parse_float(value, stream)?),
            Kind::Double => RoffScalar::Double(self.parse_double(value, stream)?),
            _ => RoffScalar::String(self.parse_string(value, stream)?),
        };
        Ok((name, value))
    }

    /// Single forward pass building the scalar list and the array directory.
    fn parse<R: Read + Seek>(&self, stream: &mut R, tokens: &[Token]) -> Result<ParseResult> {
        let mut result = ParseResult::default();
        let mut tag_group = String::new();
        let mut last_parameter = String::new();

        let mut index = 0;
        while index < tokens.len() {
            match tokens[index].kind() {
                Kind::Tag => {
                    let name = token_at(tokens, index + 1, "tag name", |k| k == Kind::Name)?;
                    tag_group = self.parse_string(name, stream)?;
                    index += 2;
                }
                Kind::EndTag => {
                    tag_group.clear();
                    index += 1;
                }
                Kind::Array => {
                    let element =
                        token_at(tokens, index + 1, "element type", Kind::is_simple_type)?.kind();
                    let name = token_at(tokens, index + 2, "array name", |k| k == Kind::Name)?;
                    let count = token_at(tokens, index + 3, "array length", |k| {
                        matches!(k, Kind::NumericValue | Kind::BinaryNumericValue)
                    })?;

                    let name = format!("{tag_group}.{}", self.parse_string(name, stream)?);
                    let name = dealias_parameter(name, &mut last_parameter);
                    let length = array_length(self.parse_int(count, stream)?)?;

                    let start_index = index + 4;
                    let blob = tokens.get(start_index).map(Token::kind) == Some(Kind::ArrayBlob);
                    let payload_tokens = if blob { 1 } else { length };
                    if start_index + payload_tokens > tokens.len() {
                        return Err(RoffError::UnexpectedEndOfTokens);
                    }

                    let descriptor = ArrayDescriptor {
                        element_kind: element,
                        start_index,
                        length,
                    };
                    if result.arrays.insert(name.clone(), descriptor).is_some() {
                        warn!(array = %name, "array registered twice; keeping the last one");
                    }
                    index = start_index + payload_tokens;
                }
                kind if kind.is_simple_type() => {
                    let (name, value) = self.parse_simple_type(tokens, index, &tag_group, stream)?;

                    // Only little-endian documents are supported.
                    if name == BYTESWAP_TEST && value != RoffScalar::Int(1) {
                        return Err(RoffError::UnsupportedEndianness(value.to_string()));
                    }
                    if name == PARAMETER_NAME {
                        if let RoffScalar::String(parameter) = &value {
                            last_parameter = parameter.clone();
                        }
                    }

                    result.scalars.push((name, value));
                    index += 3;
                }
                _ => index += 1,
            }
        }

        Ok(result)
    }
}

/// Rename the generic `parameter.data/codeNames/codeValues` arrays after the
/// most recent `parameter.name`, so repeated parameter groups do not collide.
fn dealias_parameter(name: String, last_parameter: &mut String) -> String {
    if last_parameter.is_empty() {
        return name;
    }
    let Some(field) = name
        .strip_prefix(PARAMETER_GROUP)
        .filter(|rest| rest.starts_with('.'))
    else {
        return name;
    };

    match field {
        DATA_SUFFIX => std::mem::take(last_parameter),
        CODE_NAMES_SUFFIX | CODE_VALUES_SUFFIX => format!("{last_parameter}{field}"),
        _ => name,
    }
}

/// The token at `index`, which must satisfy `accept`.
pub(crate) fn token_at<'a>(
    tokens: &'a [Token],
    index: usize,
    expected: &'static str,
    accept: impl Fn(Kind) -> bool,
) -> Result<&'a Token> {
    let token = tokens.get(index).ok_or(RoffError::UnexpectedEndOfTokens)?;
    if !accept(token.kind()) {
        return Err(RoffError::UnexpectedToken {
            index,
            expected,
            found: token.kind(),
        });
    }
    Ok(token)
}

/// The per-element payload tokens of a non-blob array.
pub(crate) fn payload<'a>(tokens: &'a [Token], array: &ArrayDescriptor) -> Result<&'a [Token]> {
    tokens
        .get(array.start_index..array.start_index + array.length)
        .ok_or(RoffError::UnexpectedEndOfTokens)
}

/// Raw bytes of a token span.
pub(crate) fn read_span<R: Read + Seek>(token: &Token, stream: &mut R) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; token.len() as usize];
    read_exact_at(stream, token.start(), &mut buf)?;
    Ok(buf)
}
