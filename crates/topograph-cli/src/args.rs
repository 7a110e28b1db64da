//! Command-line argument definitions for the Topograph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the inventory, the focal CI and the view
//! to render, plus configuration and logging.

use clap::Parser;

/// Command-line arguments for the Topograph relationship-graph renderer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the inventory JSON document
    #[arg(help = "Path to the inventory file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// CI to center the view on; without it the inventory overview is shown
    #[arg(short, long)]
    pub focus: Option<i64>,

    /// Relationship depth to traverse (1-5), overriding the configuration
    #[arg(short, long)]
    pub depth: Option<u8>,

    /// Nodes to click after loading, in order
    #[arg(long = "click", value_name = "ID")]
    pub clicks: Vec<i64>,

    /// Zoom button presses to apply; negative values zoom out
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub zoom_steps: i32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
