//! Command line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Asset Assistant - Sort poster and background artwork into your media library
#[derive(Parser, Debug)]
#[command(name = "asset-assistant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}
