//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Displays the contents of an ACS object file.
///
/// Supported containers: ACS0, and ACSE/ACSe in both the direct and the
/// indirect layout.
#[derive(Debug, Parser)]
#[command(name = "acsdump", version)]
pub struct Args {
    /// View selected chunk; four characters, case-insensitive (ACSE/ACSe only)
    #[arg(short = 'c', value_name = "chunk")]
    pub view_chunk: Option<String>,

    /// List chunks in the object file (ACSE/ACSe only)
    #[arg(short = 'l')]
    pub list_chunks: bool,

    /// The object file to inspect
    pub file: PathBuf,
}
