//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use fontdl_core::FilenameScheme;

/// Download the WOFF2 files of a web font family.
///
/// Fetches the family's stylesheet from the font service and saves every
/// referenced .woff2 file under OUTPUT_DIR/<Font_Name>/, skipping files that
/// already exist.
#[derive(Parser, Debug)]
#[command(name = "fontdl")]
#[command(author, version, about)]
#[command(after_help = "Example: fontdl \"Noto Sans\"")]
pub struct Args {
    /// Font family display name, e.g. "Noto Sans"
    pub font_name: String,

    /// Output directory (default: config `output_dir`, then "fonts")
    pub output_dir: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// File naming: "family" (one file per family) or "variant" (family-weight-style)
    #[arg(long, value_name = "SCHEME")]
    pub naming: Option<FilenameScheme>,
}
