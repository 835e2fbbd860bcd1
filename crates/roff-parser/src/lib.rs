//! Pure-Rust reader for ROFF grid model files.
//!
//! ROFF comes in two encodings, `roff-asc` (whitespace separated ASCII) and
//! `roff-bin` (NUL separated, little-endian numbers). Both describe the same
//! thing: a sequence of named tag groups holding typed scalars and arrays.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! use roff_parser::Reader;
//!
//! # fn main() -> roff_parser::Result<()> {
//! let file = File::open("model.roff")?;
//! let mut reader = Reader::new(BufReader::new(file));
//! reader.parse()?;
//! for (name, value) in reader.scalar_named_values() {
//!     println!("{name} = {value}");
//! }
//! let codes = reader.get_int_array("composite.codeValues")?;
//! # let _ = codes;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod parser;
pub mod reader;
mod stream;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use error::{Result, RoffError};
pub use parser::{ArrayDescriptor, BinaryParser, ParseResult, Parser, TextParser};
pub use reader::Reader;
pub use token::{Kind, SIMPLE_TYPES, Token};
pub use tokenizer::{BinaryTokenizer, FileFormat, TextTokenizer, Tokenizer, detect_file_type};
pub use value::RoffScalar;
