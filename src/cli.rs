use clap::{Parser, Subcommand};
use mpdforge::config::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mpdforge")]
#[command(author, version, about = "Convert DASH representation descriptors into HLS master playlists")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a master playlist from a JSON list of representation descriptors
    Convert {
        /// Descriptor file to read
        #[arg(required = true)]
        input: PathBuf,

        /// Output format (overrides the config file)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a single manifest attribute value and print it as JSON
    Decode {
        /// Attribute name, e.g. mediaPresentationDuration
        name: String,

        /// Raw attribute value
        value: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
