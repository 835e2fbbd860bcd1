use std::io::{Read, Seek};

use roff_parser::{Kind, Reader, RoffError};
use serde::Serialize;
use tracing::debug;

use crate::cli::ArrayArgs;
use crate::config::AppConfig;

/// Decoded values of one array, typed by its element kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum ArrayValues {
    Char(Vec<String>),
    Bool(Vec<bool>),
    Byte(Vec<u8>),
    Int(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl ArrayValues {
    /// Decode `name` with the getter matching its recorded kind.
    fn read<R: Read + Seek>(reader: &mut Reader<R>, name: &str) -> Result<Self, RoffError> {
        let kind = reader
            .array_descriptor(name)
            .map(|array| array.element_kind)
            .ok_or_else(|| RoffError::UnknownField(name.to_string()))?;

        Ok(match kind {
            Kind::Char => Self::Char(reader.get_string_array(name)?),
            Kind::Bool => Self::Bool(reader.get_bool_array(name)?),
            Kind::Byte => Self::Byte(reader.get_byte_array(name)?),
            Kind::Int => Self::Int(reader.get_int_array(name)?),
            Kind::Float => Self::Float(reader.get_float_array(name)?),
            Kind::Double => Self::Double(reader.get_double_array(name)?),
            other => return Err(RoffError::UnsupportedKind(other)),
        })
    }

    fn len(&self) -> usize {
        match self {
            Self::Char(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Byte(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Double(v) => v.len(),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Self::Char(v) => v.truncate(len),
            Self::Bool(v) => v.truncate(len),
            Self::Byte(v) => v.truncate(len),
            Self::Int(v) => v.truncate(len),
            Self::Float(v) => v.truncate(len),
            Self::Double(v) => v.truncate(len),
        }
    }

    fn rendered(&self) -> Vec<String> {
        fn each<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
            values.iter().map(ToString::to_string).collect()
        }
        match self {
            Self::Char(v) => v.iter().map(|s| format!("{s:?}")).collect(),
            Self::Bool(v) => each(v),
            Self::Byte(v) => each(v),
            Self::Int(v) => each(v),
            Self::Float(v) => each(v),
            Self::Double(v) => each(v),
        }
    }
}

#[derive(Debug, Serialize)]
struct ArrayReport<'a> {
    name: &'a str,
    kind: Kind,
    length: usize,
    values: ArrayValues,
}

pub fn execute(args: ArrayArgs) -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default()?;
    let (_, mut reader) = crate::cli::load(&args.path)?;

    let mut values = ArrayValues::read(&mut reader, &args.name)?;
    let length = values.len();
    let limit = args.limit.unwrap_or(cfg.max_elements);
    if limit > 0 {
        values.truncate(limit);
    }
    debug!(array = %args.name, length, shown = values.len(), "decoded array");

    let kind = reader
        .array_descriptor(&args.name)
        .map(|array| array.element_kind)
        .ok_or_else(|| RoffError::UnknownField(args.name.clone()))?;

    if args.json || cfg.json {
        let report = ArrayReport {
            name: &args.name,
            kind,
            length,
            values,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} ({kind}, {length} element(s))", args.name);
    for (i, value) in values.rendered().iter().enumerate() {
        println!("{i:>8}  {value}");
    }
    let hidden = length - values.len();
    if hidden > 0 {
        println!("     ... {hidden} more (use --limit 0 to show all)");
    }
    Ok(())
}
