//! Command-line argument definitions for the Dendra CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the hierarchy source (a JSON file or a
//! host page), the interaction state to apply before export, the output path,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Dendra dendrogram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input hierarchy JSON file
    #[arg(help = "Path to the input file", required_unless_present = "page")]
    pub input: Option<String>,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Host page (XHTML) declaring the chart container
    #[arg(long, conflicts_with = "input")]
    pub page: Option<String>,

    /// Id of the chart container inside the host page
    #[arg(long, default_value = "container-0", requires = "page")]
    pub container: String,

    /// URL the host page is served from
    #[arg(long, default_value = "http://localhost:8888/lab", requires = "page")]
    pub document_url: String,

    /// Directory served under the `/files/` route (defaults to the page's directory)
    #[arg(long, requires = "page")]
    pub files_root: Option<String>,

    /// Leaf ids to pin before exporting
    #[arg(long, value_delimiter = ',')]
    pub pin: Vec<String>,

    /// Node id to hover before exporting
    #[arg(long)]
    pub hover: Option<String>,

    /// Zoom scale to apply before exporting
    #[arg(long)]
    pub scale: Option<f32>,

    /// Center the content in the viewport before exporting
    #[arg(long)]
    pub recenter: bool,

    /// Keep the instructional overlay in the output
    #[arg(long)]
    pub overlay: bool,
}
