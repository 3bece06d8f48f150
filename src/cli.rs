//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the `alertrix` binary
//! using the `clap` crate. The binary performs a single one-shot send of an
//! alert event read from a JSON file.

use clap::Parser;
use std::path::PathBuf;

/// Delivers a monitoring alert event to a Matrix room.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML provider configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "alertrix.yaml")]
    pub config: PathBuf,

    /// Path to a JSON file describing the alert event.
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,

    /// Treat the event as a resolution instead of a new failure streak.
    #[arg(long)]
    pub resolved: bool,
}
