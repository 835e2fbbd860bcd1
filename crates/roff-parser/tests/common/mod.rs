//! Builds the same logical ROFF document in both encodings.

#![allow(dead_code)]

use std::fmt::Write;

#[derive(Debug, Clone)]
pub enum Value {
    Char(String),
    Bool(bool),
    Byte(u8),
    Int(i32),
    Float(f32),
    Double(f64),
}

impl Value {
    pub fn char(s: &str) -> Self {
        Self::Char(s.to_string())
    }

    fn keyword(&self) -> &'static str {
        match self {
            Self::Char(_) => "char",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "byte",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Self::Char(s) => write!(out, "\"{s}\""),
            Self::Bool(b) => write!(out, "{}", u8::from(*b)),
            Self::Byte(b) => write!(out, "{b}"),
            Self::Int(v) => write!(out, "{v}"),
            Self::Float(v) => write!(out, "{v:?}"),
            Self::Double(v) => write!(out, "{v:?}"),
        }
        .unwrap();
    }

    fn write_binary(&self, out: &mut Vec<u8>) {
        match self {
            Self::Char(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Self::Bool(b) => out.push(u8::from(*b)),
            Self::Byte(b) => out.push(*b),
            Self::Int(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Float(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::Double(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    Scalar(String, Value),
    Array(&'static str, String, Vec<Value>),
}

#[derive(Debug, Clone, Default)]
pub struct RoffBuilder {
    groups: Vec<(String, Vec<Entry>)>,
}

impl RoffBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, name: &str) -> Self {
        self.groups.push((name.to_string(), Vec::new()));
        self
    }

    pub fn scalar(mut self, name: &str, value: Value) -> Self {
        self.current().push(Entry::Scalar(name.to_string(), value));
        self
    }

    /// `kind` is the element keyword, so empty arrays keep their type.
    pub fn array(mut self, kind: &'static str, name: &str, values: Vec<Value>) -> Self {
        self.current()
            .push(Entry::Array(kind, name.to_string(), values));
        self
    }

    fn current(&mut self) -> &mut Vec<Entry> {
        &mut self.groups.last_mut().expect("tag() must come first").1
    }

    pub fn text(&self) -> Vec<u8> {
        let mut out = String::from("roff-asc\n#ROFF file#\n#Creator: RoffBuilder#\n");
        for (group, entries) in &self.groups {
            writeln!(out, "tag {group}").unwrap();
            for entry in entries {
                match entry {
                    Entry::Scalar(name, value) => {
                        write!(out, "{} {name} ", value.keyword()).unwrap();
                        value.write_text(&mut out);
                        out.push('\n');
                    }
                    Entry::Array(kind, name, values) => {
                        writeln!(out, "array {kind} {name} {}", values.len()).unwrap();
                        for value in values {
                            out.push(' ');
                            value.write_text(&mut out);
                        }
                        out.push('\n');
                    }
                }
            }
            out.push_str("endtag\n");
        }
        out.into_bytes()
    }

    pub fn binary(&self) -> Vec<u8> {
        let mut out = b"roff-bin\0#ROFF file#\0#Creator: RoffBuilder#\0".to_vec();
        for (group, entries) in &self.groups {
            push_word(&mut out, "tag");
            push_word(&mut out, group);
            for entry in entries {
                match entry {
                    Entry::Scalar(name, value) => {
                        push_word(&mut out, value.keyword());
                        push_word(&mut out, name);
                        value.write_binary(&mut out);
                    }
                    Entry::Array(kind, name, values) => {
                        push_word(&mut out, "array");
                        push_word(&mut out, kind);
                        push_word(&mut out, name);
                        out.extend_from_slice(&(values.len() as i32).to_le_bytes());
                        for value in values {
                            value.write_binary(&mut out);
                        }
                    }
                }
            }
            push_word(&mut out, "endtag");
        }
        out
    }
}

fn push_word(out: &mut Vec<u8>, word: &str) {
    out.extend_from_slice(word.as_bytes());
    out.push(0);
}

/// The document stored in `tests/data/facies_info.roff`.
pub fn facies_info() -> RoffBuilder {
    RoffBuilder::new()
        .tag("filedata")
        .scalar("byteswaptest", Value::Int(1))
        .scalar("filetype", Value::char("parameter"))
        .scalar("creationDate", Value::char("01/01/2024 12:00:00"))
        .tag("version")
        .scalar("major", Value::Int(2))
        .scalar("minor", Value::Int(0))
        .tag("dimensions")
        .scalar("nX", Value::Int(46))
        .scalar("nY", Value::Int(112))
        .scalar("nZ", Value::Int(1))
        .tag("parameter")
        .scalar("name", Value::char("composite"))
        .scalar("fl", Value::Float(1.23))
        .scalar("db", Value::Double(9000.9))
        .scalar("bt", Value::Byte(42))
        .scalar("bo", Value::Bool(true))
        .array(
            "char",
            "codeNames",
            (1..=6)
                .map(|i| Value::Char(format!("code name {i}")))
                .collect(),
        )
        .array("int", "codeValues", (0..6).map(Value::Int).collect())
        .array(
            "float",
            "floatData",
            [0.5, 1.5, 2.5, 3.5, 4.5].into_iter().map(Value::Float).collect(),
        )
        .array(
            "double",
            "doubleData",
            (1..=6).map(|i| Value::Double(f64::from(i))).collect(),
        )
        .array("int", "intData", (7..10).map(Value::Int).collect())
        .array(
            "int",
            "data",
            [0, 1, 5, 2].into_iter().map(Value::Int).collect(),
        )
        .tag("eof")
}
