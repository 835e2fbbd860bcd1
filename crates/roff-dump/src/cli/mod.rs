pub mod array;
pub mod config_cmd;
pub mod info;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use roff_parser::Reader;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "roff-dump",
    version,
    about = "Inspect ROFF grid model files (roff-asc and roff-bin)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the format, scalars and array directory of a file.
    Info(InfoArgs),

    /// Print the values of one array.
    Array(ArrayArgs),

    /// View / edit configuration.
    Config(ConfigArgs),
}

//  Subcommand argument structs

#[derive(Debug, clap::Args, Clone)]
pub struct InfoArgs {
    /// Path to a ROFF file.
    pub path: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ArrayArgs {
    /// Path to a ROFF file.
    pub path: PathBuf,

    /// Array name as listed by `info` (e.g. `composite.codeNames`).
    pub name: String,

    /// Number of values to print (0 = all, default from config).
    #[arg(long, env = "ROFF_DUMP_LIMIT")]
    pub limit: Option<usize>,

    /// Print JSON instead of a listing.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Display the current configuration.
    Show,
    /// Set a configuration value.
    Set { key: String, value: String },
}

/// Read the whole file and parse it.
pub fn load(path: &Path) -> anyhow::Result<(u64, Reader<Cursor<Vec<u8>>>)> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let size = data.len() as u64;
    info!(path = %path.display(), bytes = size, "reading ROFF file");

    let mut reader = Reader::new(Cursor::new(data));
    reader
        .parse()
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    Ok((size, reader))
}
