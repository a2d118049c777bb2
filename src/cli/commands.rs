use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jt", about = concat!("[>] jotter v", env!("CARGO_PKG_VERSION"), " - notes behind a search box"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run against a different notebook directory
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty notebook in the current directory
    Init(InitArgs),
    /// Print the notebook as transport JSON
    Export,
    /// Merge transport JSON from a file or stdin into the notebook
    Import(ImportArgs),
    /// Resolve a search-box input and print the candidates
    Find(FindArgs),
    /// Print the notebook outline
    Tree,
    /// Print the code table
    Codes,
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Reinitialize even if jotter.json already exists
    #[arg(long)]
    pub force: bool,
    /// Also write a starter jotter.toml
    #[arg(long)]
    pub config: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// File holding the exported JSON (default: stdin)
    pub file: Option<PathBuf>,
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Args)]
pub struct FindArgs {
    /// Search box contents
    pub input: String,
    /// Resolve at this selection path instead of the saved one,
    /// e.g. "Games" or "Games/Skyrim/Quests"
    #[arg(long, value_name = "PATH")]
    pub at: Option<String>,
}
