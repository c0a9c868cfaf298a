use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "comp-check",
    version,
    about = "Comp Check - Validate .comp hardware component descriptors",
    long_about = "Comp Check parses .comp files describing PC hardware components, reports every structural, syntactic and semantic problem it finds, and prints the parsed component data."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate .comp files
    #[command(about = "Validate .comp files or directories of them")]
    Check(CheckArgs),

    /// Print the parsed document
    #[command(about = "Parse a .comp file and print its data regardless of validity")]
    Parse(ParseArgs),

    /// List component types
    #[command(about = "List the component types a .comp file may declare")]
    Types,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files or directories to check
    #[arg(required = true, help = "Files or directories to check")]
    pub paths: Vec<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, help = "Output format: text or json")]
    pub format: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Path to the .comp file
    #[arg(help = "Path to the .comp file")]
    pub path: PathBuf,
}
