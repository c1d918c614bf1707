//! Metadoc CLI - Command-line interface for documentation identifier resolution

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod inspect;
mod logging;
mod resolve;

#[derive(Parser)]
#[command(name = "metadoc")]
#[command(version = metadoc_core::VERSION)]
#[command(about = "Attach XML documentation to compiled-module metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a documentation file against module metadata
    Resolve {
        /// Module metadata (JSON)
        #[arg(long)]
        metadata: PathBuf,

        /// XML documentation file
        #[arg(long)]
        docs: PathBuf,

        /// Configuration file (defaults to ./metadoc.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the documented symbol table as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print display and comparison forms of raw type names
    Decode {
        /// Raw metadata type names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the parsed structure of documentation identifiers
    ParseId {
        /// Documentation identifiers (e.g. "M:N.C.M(System.Int32)")
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            metadata,
            docs,
            config,
            output,
        } => {
            let options = resolve::ResolveOptions {
                metadata,
                docs,
                config,
                output,
            };
            let report = resolve::run(&options)?;
            report.print_summary();
            if report.failed() {
                std::process::exit(1);
            }
        }

        Commands::Decode { names } => inspect::decode_names(&names),

        Commands::ParseId { ids } => {
            if !inspect::parse_ids(&ids) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
