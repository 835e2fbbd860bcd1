mod common;

use std::io::Cursor;

use pretty_assertions::assert_eq;
use roff_parser::{FileFormat, Kind, Reader, RoffError, RoffScalar, detect_file_type};

use common::{RoffBuilder, Value, facies_info};

const FACIES_INFO: &[u8] = include_bytes!("data/facies_info.roff");

fn reader(bytes: Vec<u8>) -> Reader<Cursor<Vec<u8>>> {
    let mut reader = Reader::new(Cursor::new(bytes));
    reader.parse().unwrap();
    reader
}

fn scalar<'a>(reader: &'a Reader<Cursor<Vec<u8>>>, name: &str) -> &'a RoffScalar {
    reader
        .scalar_named_values()
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("missing scalar {name}"))
}

fn assert_facies(mut reader: Reader<Cursor<Vec<u8>>>) {
    assert_eq!(scalar(&reader, "filedata.byteswaptest"), &RoffScalar::Int(1));
    assert_eq!(scalar(&reader, "version.major"), &RoffScalar::Int(2));
    assert_eq!(scalar(&reader, "dimensions.nX"), &RoffScalar::Int(46));
    assert_eq!(
        scalar(&reader, "parameter.name"),
        &RoffScalar::String("composite".to_string())
    );
    assert_eq!(scalar(&reader, "parameter.fl"), &RoffScalar::Float(1.23));
    assert_eq!(scalar(&reader, "parameter.db"), &RoffScalar::Double(9000.9));
    assert_eq!(scalar(&reader, "parameter.bt"), &RoffScalar::Byte(42));
    assert_eq!(scalar(&reader, "parameter.bo"), &RoffScalar::Bool(true));

    assert_eq!(
        reader.named_array_types(),
        vec![
            ("composite.codeNames".to_string(), Kind::Char),
            ("composite.codeValues".to_string(), Kind::Int),
            ("parameter.floatData".to_string(), Kind::Float),
            ("parameter.doubleData".to_string(), Kind::Double),
            ("parameter.intData".to_string(), Kind::Int),
            ("composite".to_string(), Kind::Int),
        ]
    );

    let code_names = reader.get_string_array("composite.codeNames").unwrap();
    assert_eq!(code_names.len(), 6);
    assert_eq!(code_names[0], "code name 1");
    assert_eq!(code_names[5], "code name 6");

    assert_eq!(
        reader.get_int_array("composite.codeValues").unwrap(),
        vec![0, 1, 2, 3, 4, 5]
    );
    assert_eq!(reader.get_float_array("parameter.floatData").unwrap().len(), 5);
    assert_eq!(
        reader.get_double_array("parameter.doubleData").unwrap(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
    );
    assert_eq!(reader.get_int_array("composite").unwrap(), vec![0, 1, 5, 2]);
    assert_eq!(reader.array_length("parameter.intData"), 3);
}

#[test]
fn facies_fixture_text() {
    let reader = reader(FACIES_INFO.to_vec());
    assert_eq!(reader.format(), Some(FileFormat::Text));
    assert_facies(reader);
}

#[test]
fn facies_builder_text() {
    assert_facies(reader(facies_info().text()));
}

#[test]
fn facies_builder_binary() {
    let reader = reader(facies_info().binary());
    assert_eq!(reader.format(), Some(FileFormat::Binary));
    assert_facies(reader);
}

#[test]
fn encodings_agree() {
    let mut text = reader(FACIES_INFO.to_vec());
    let mut binary = reader(facies_info().binary());

    assert_eq!(text.scalar_named_values(), binary.scalar_named_values());
    assert_eq!(text.named_array_types(), binary.named_array_types());

    for (name, kind) in text.named_array_types() {
        assert_eq!(text.array_length(&name), binary.array_length(&name), "{name}");
        match kind {
            Kind::Char => assert_eq!(
                text.get_string_array(&name).unwrap(),
                binary.get_string_array(&name).unwrap()
            ),
            Kind::Int => assert_eq!(
                text.get_int_array(&name).unwrap(),
                binary.get_int_array(&name).unwrap()
            ),
            Kind::Float => assert_eq!(
                text.get_float_array(&name).unwrap(),
                binary.get_float_array(&name).unwrap()
            ),
            Kind::Double => assert_eq!(
                text.get_double_array(&name).unwrap(),
                binary.get_double_array(&name).unwrap()
            ),
            other => panic!("unexpected array kind {other}"),
        }
    }
}

#[test]
fn small_fixed_width_arrays_agree() {
    let doc = RoffBuilder::new()
        .tag("zvalues")
        .array("byte", "splitEnz", vec![Value::Byte(1), Value::Byte(4), Value::Byte(255)])
        .array("bool", "active", vec![Value::Bool(true), Value::Bool(false)])
        .array("float", "empty", Vec::new())
        .scalar("after", Value::Int(-3));

    for bytes in [doc.text(), doc.binary()] {
        let mut reader = reader(bytes);
        assert_eq!(reader.get_byte_array("zvalues.splitEnz").unwrap(), vec![1, 4, 255]);
        assert_eq!(
            reader.get_bool_array("zvalues.active").unwrap(),
            vec![true, false]
        );
        assert!(reader.get_float_array("zvalues.empty").unwrap().is_empty());
        assert_eq!(
            reader.scalar_named_values(),
            &[("zvalues.after".to_string(), RoffScalar::Int(-3))]
        );
    }
}

#[test]
fn empty_code_names() {
    let doc = RoffBuilder::new()
        .tag("parameter")
        .scalar("name", Value::char("EQLNUM"))
        .array("char", "codeNames", vec![Value::char(""), Value::char("")])
        .array("int", "codeValues", vec![Value::Int(1), Value::Int(2)])
        .array("int", "data", vec![Value::Int(1), Value::Int(2), Value::Int(1)]);

    for bytes in [doc.text(), doc.binary()] {
        let mut reader = reader(bytes);
        assert_eq!(
            reader.get_string_array("EQLNUM.codeNames").unwrap(),
            vec![String::new(), String::new()]
        );
        assert_eq!(reader.get_int_array("EQLNUM.codeValues").unwrap(), vec![1, 2]);
        assert_eq!(reader.get_int_array("EQLNUM").unwrap(), vec![1, 2, 1]);
    }
}

#[test]
fn consecutive_parameter_groups_are_dealiased() {
    let doc = RoffBuilder::new()
        .tag("parameter")
        .scalar("name", Value::char("PORO"))
        .array("float", "data", vec![Value::Float(0.25), Value::Float(0.3)])
        .tag("parameter")
        .scalar("name", Value::char("EQLNUM"))
        .array("char", "codeNames", vec![Value::char("a")])
        .array("int", "codeValues", vec![Value::Int(1)])
        .array("int", "data", vec![Value::Int(1), Value::Int(1)]);

    for bytes in [doc.text(), doc.binary()] {
        let mut reader = reader(bytes);
        assert_eq!(
            reader.named_array_types(),
            vec![
                ("PORO".to_string(), Kind::Float),
                ("EQLNUM.codeNames".to_string(), Kind::Char),
                ("EQLNUM.codeValues".to_string(), Kind::Int),
                ("EQLNUM".to_string(), Kind::Int),
            ]
        );
        assert_eq!(reader.get_float_array("PORO").unwrap(), vec![0.25, 0.3]);
    }
}

#[test]
fn unsupported_endianness() {
    let doc = RoffBuilder::new()
        .tag("filedata")
        .scalar("byteswaptest", Value::Int(16_777_216));

    for bytes in [doc.text(), doc.binary()] {
        let mut reader = Reader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.parse(),
            Err(RoffError::UnsupportedEndianness(_))
        ));
        assert!(reader.scalar_named_values().is_empty());
    }
}

#[test]
fn detection() {
    let text = facies_info().text();
    let binary = facies_info().binary();
    assert_eq!(
        detect_file_type(&mut Cursor::new(text)).unwrap(),
        FileFormat::Text
    );
    assert_eq!(
        detect_file_type(&mut Cursor::new(binary)).unwrap(),
        FileFormat::Binary
    );

    for bytes in [Vec::new(), b"roff-xml\n".to_vec(), b"tag a endtag".to_vec()] {
        let mut reader = Reader::new(Cursor::new(bytes));
        assert!(matches!(reader.parse(), Err(RoffError::UnexpectedFileType)));
    }
}

#[test]
fn short_text_array_is_rejected() {
    let bytes = b"roff-asc\ntag t\narray int a 4 1 2 3\nendtag\n".to_vec();
    let mut reader = Reader::new(Cursor::new(bytes));
    assert!(matches!(
        reader.parse(),
        Err(RoffError::ArrayTooShort {
            expected: 4,
            found: 3,
            ..
        })
    ));
    assert!(reader.named_array_types().is_empty());
}

#[test]
fn truncated_binary_array_is_rejected() {
    let mut bytes = RoffBuilder::new()
        .tag("t")
        .array("double", "a", vec![Value::Double(1.0), Value::Double(2.0)])
        .binary();
    let endtag = b"endtag\0".len();
    bytes.truncate(bytes.len() - endtag - 4);

    let mut reader = Reader::new(Cursor::new(bytes));
    assert!(matches!(
        reader.parse(),
        Err(RoffError::UnexpectedEof { .. })
    ));
}

#[test]
fn getter_errors() {
    let mut reader = reader(facies_info().text());
    assert!(matches!(
        reader.get_double_array("composite.codeValues"),
        Err(RoffError::ArrayTypeMismatch {
            expected: Kind::Double,
            found: Kind::Int,
            ..
        })
    ));
    assert!(matches!(
        reader.get_string_array("parameter.data"),
        Err(RoffError::UnknownField(name)) if name == "parameter.data"
    ));
    assert_eq!(reader.array_length("parameter.data"), 0);
}
