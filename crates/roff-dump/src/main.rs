mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    //  Logging (stderr, so stdout stays clean for --json)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,roff_dump=info,roff_parser=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    match args.command {
        cli::Commands::Info(info_args) => cli::info::execute(info_args),
        cli::Commands::Array(array_args) => cli::array::execute(array_args),
        cli::Commands::Config(c) => cli::config_cmd::execute(c),
    }
}
