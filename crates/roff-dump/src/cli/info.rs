use std::path::Path;

use roff_parser::{FileFormat, Kind, RoffScalar};
use serde::Serialize;

use crate::cli::InfoArgs;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct InfoReport<'a> {
    path: &'a Path,
    file_size: u64,
    format: Option<FileFormat>,
    scalars: Vec<ScalarEntry<'a>>,
    arrays: Vec<ArrayEntry>,
}

#[derive(Debug, Serialize)]
struct ScalarEntry<'a> {
    name: &'a str,
    kind: Kind,
    value: &'a RoffScalar,
}

#[derive(Debug, Serialize)]
struct ArrayEntry {
    name: String,
    kind: Kind,
    length: usize,
}

pub fn execute(args: InfoArgs) -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default()?;
    let (file_size, reader) = crate::cli::load(&args.path)?;

    let report = InfoReport {
        path: args.path.as_path(),
        file_size,
        format: reader.format(),
        scalars: reader
            .scalar_named_values()
            .iter()
            .map(|(name, value)| ScalarEntry {
                name: name.as_str(),
                kind: value.kind(),
                value,
            })
            .collect(),
        arrays: reader
            .named_array_types()
            .into_iter()
            .map(|(name, kind)| {
                let length = reader.array_length(&name);
                ArrayEntry { name, kind, length }
            })
            .collect(),
    };

    if args.json || cfg.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:    {}", report.path.display());
    println!(
        "Size:    {} ({} bytes)",
        human_size(report.file_size),
        report.file_size
    );
    if let Some(format) = report.format {
        println!("Format:  {format}");
    }

    println!("\n{:<40} {:<8} {}", "Scalar", "Kind", "Value");
    println!("{}", "-".repeat(64));
    for scalar in &report.scalars {
        println!("{:<40} {:<8} {}", scalar.name, scalar.kind, scalar.value);
    }

    println!("\n{:<40} {:<8} {:>10}", "Array", "Kind", "Length");
    println!("{}", "-".repeat(60));
    for array in &report.arrays {
        println!("{:<40} {:<8} {:>10}", array.name, array.kind, array.length);
    }
    println!(
        "\n{} scalar(s), {} array(s).",
        report.scalars.len(),
        report.arrays.len()
    );
    Ok(())
}

fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
