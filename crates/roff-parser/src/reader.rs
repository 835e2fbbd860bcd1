//! High-level access to a ROFF document.
//!
//! [`Reader::parse`] detects the encoding, tokenizes the whole stream and
//! runs the structural pass. Scalars are decoded right away; arrays are only
//! located, and each typed getter decodes its array from the stream on
//! every call.

use std::io::{Read, Seek};

use tracing::{debug, trace};

use crate::error::{Result, RoffError};
use crate::parser::{ArrayDescriptor, BinaryParser, ParseResult, Parser, TextParser};
use crate::token::{Kind, Token};
use crate::tokenizer::{BinaryTokenizer, FileFormat, TextTokenizer, Tokenizer, detect_file_type};
use crate::value::RoffScalar;

/// A parsed document together with the stream its arrays are read from.
#[derive(Debug)]
pub struct Reader<R> {
    stream: R,
    format: Option<FileFormat>,
    tokens: Vec<Token>,
    result: ParseResult,
}

impl<R: Read + Seek> Reader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            format: None,
            tokens: Vec::new(),
            result: ParseResult::default(),
        }
    }

    /// Detect, tokenize and index the document.
    ///
    /// Calling this again starts over. On error the reader is left empty.
    pub fn parse(&mut self) -> Result<()> {
        self.format = None;
        self.tokens.clear();
        self.result = ParseResult::default();

        let format = detect_file_type(&mut self.stream)?;
        debug!(%format, "detected file format");

        let (tokens, result) = match format {
            FileFormat::Text => {
                let tokens = TextTokenizer.tokenize_stream(&mut self.stream)?;
                let result = TextParser.parse(&mut self.stream, &tokens)?;
                (tokens, result)
            }
            FileFormat::Binary => {
                let tokens = BinaryTokenizer.tokenize_stream(&mut self.stream)?;
                let result = BinaryParser.parse(&mut self.stream, &tokens)?;
                (tokens, result)
            }
        };

        debug!(
            %format,
            tokens = tokens.len(),
            scalars = result.scalars.len(),
            arrays = result.arrays.len(),
            "parse complete"
        );

        self.format = Some(format);
        self.tokens = tokens;
        self.result = result;
        Ok(())
    }

    /// Encoding of the last successfully parsed document.
    pub fn format(&self) -> Option<FileFormat> {
        self.format
    }

    /// Every scalar in document order, duplicates included.
    pub fn scalar_named_values(&self) -> &[(String, RoffScalar)] {
        &self.result.scalars
    }

    /// Array names and element kinds in document order.
    pub fn named_array_types(&self) -> Vec<(String, Kind)> {
        self.result.array_types()
    }

    /// Element count of `name`, or 0 when no such array exists.
    pub fn array_length(&self, name: &str) -> usize {
        self.result.arrays.get(name).map_or(0, |array| array.length)
    }

    pub fn array_descriptor(&self, name: &str) -> Option<&ArrayDescriptor> {
        self.result.arrays.get(name)
    }

    pub fn into_inner(self) -> R {
        self.stream
    }

    pub fn get_ref(&self) -> &R {
        &self.stream
    }

    /// Mutable access to the stream. Call [`Reader::parse`] again after
    /// changing its contents; descriptors point at the old offsets.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.stream
    }

    pub fn get_string_array(&mut self, name: &str) -> Result<Vec<String>> {
        let array = self.lookup(name, Kind::Char)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_string_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_string_array(&self.tokens, &mut self.stream, &array),
        }
    }

    pub fn get_int_array(&mut self, name: &str) -> Result<Vec<i32>> {
        let array = self.lookup(name, Kind::Int)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_int_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_int_array(&self.tokens, &mut self.stream, &array),
        }
    }

    pub fn get_byte_array(&mut self, name: &str) -> Result<Vec<u8>> {
        let array = self.lookup(name, Kind::Byte)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_byte_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_byte_array(&self.tokens, &mut self.stream, &array),
        }
    }

    pub fn get_float_array(&mut self, name: &str) -> Result<Vec<f32>> {
        let array = self.lookup(name, Kind::Float)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_float_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_float_array(&self.tokens, &mut self.stream, &array),
        }
    }

    pub fn get_double_array(&mut self, name: &str) -> Result<Vec<f64>> {
        let array = self.lookup(name, Kind::Double)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_double_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_double_array(&self.tokens, &mut self.stream, &array),
        }
    }

    pub fn get_bool_array(&mut self, name: &str) -> Result<Vec<bool>> {
        let array = self.lookup(name, Kind::Bool)?;
        match self.format {
            Some(FileFormat::Binary) => {
                BinaryParser.parse_bool_array(&self.tokens, &mut self.stream, &array)
            }
            _ => TextParser.parse_bool_array(&self.tokens, &mut self.stream, &array),
        }
    }

    fn lookup(&self, name: &str, expected: Kind) -> Result<ArrayDescriptor> {
        let array = self
            .result
            .arrays
            .get(name)
            .ok_or_else(|| RoffError::UnknownField(name.to_string()))?;
        if array.element_kind != expected {
            return Err(RoffError::ArrayTypeMismatch {
                name: name.to_string(),
                expected,
                found: array.element_kind,
            });
        }
        trace!(array = name, length = array.length, "decoding array");
        Ok(*array)
    }
}
