//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsonweave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Renderer settings file (TOML)
    #[arg(long, global = true, value_name = "FILE", env = "JSONWEAVE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a JSON template against JSON data
    Render {
        /// Template file (`-` reads stdin)
        template: PathBuf,

        /// Data file (`-` reads stdin); defaults to null
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Root data file for `$$` queries; defaults to the data
        #[arg(long, value_name = "FILE")]
        root: Option<PathBuf>,

        /// Render in list mode and print an array
        #[arg(long)]
        list: bool,

        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
    },

    /// Show the placeholders of a template
    Inspect {
        /// Template file (`-` reads stdin)
        template: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
