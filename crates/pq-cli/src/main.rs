//! CLI frontend for the Pagequest wiki-to-world compiler.

mod commands;
mod dir_source;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pq",
    about = "Pagequest — compile wiki pages into a game world",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile all wiki pages and report diagnostics
    Build {
        /// Directory containing the wiki pages (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Also show debug-level diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate wiki pages without producing output
    Check {
        /// Directory containing the wiki pages (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Export the compiled world as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory containing the wiki pages (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { dir, verbose } => commands::build::run(&dir, verbose),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::Export { output, dir } => commands::export::run(&dir, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
