//! OxiArc CLI - The Oxidized Archiver
//!
//! Decodes raw DEFLATE64 streams (ZIP method 9) and lists the compression
//! methods the ZIP member reader supports.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxiarc")]
#[command(
    author,
    version,
    about = "The Oxidized Archiver - Pure Rust DEFLATE64 decoder"
)]
#[command(long_about = "
OxiArc decodes DEFLATE64 (\"Enhanced Deflate\", ZIP method 9) data.

Examples:
  oxiarc inflate64 member.bin -o member.txt
  oxiarc inflate64 member.bin --chunk-size 4096 > member.txt
  oxiarc methods
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a raw DEFLATE64 stream
    #[command(alias = "x")]
    Inflate64 {
        /// File holding the compressed stream
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compressed bytes read per decoder call (default: the decoder's hint)
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// List supported compression methods
    #[command(alias = "m")]
    Methods,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = stderrlog::new()
        .modules(["oxiarc", "oxiarc_archive", "oxiarc_deflate64"])
        .quiet(cli.quiet)
        .verbosity(1 + cli.verbose as usize)
        .init()
    {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Inflate64 {
            input,
            output,
            chunk_size,
        } => commands::cmd_inflate64(&input, output.as_deref(), chunk_size),
        Commands::Methods => commands::cmd_methods(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
