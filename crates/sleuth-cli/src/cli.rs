use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sleuth")]
#[command(about = "Resolve and inspect named structures in binary images", version)]
pub struct Args {
    /// Do not display the banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Settings file (TOML)
    #[arg(short, long, env = "SLEUTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// CSV profile to load
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Binary image to load
    #[arg(short, long, visible_alias = "image")]
    pub input: Option<PathBuf>,

    /// Directory for extracted regions and corrected profiles
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve every structure and list offsets
    List {
        /// Print the resolution report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the profile with resolved absolute offsets
    Resolve {
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Hexdump a resolved structure
    View {
        name: String,
        /// Bytes per line
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Write a resolved structure's bytes to a file
    Dump {
        name: String,
        /// Output file (default: <NAME>.bin)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start the interactive shell (default)
    Shell,
}
