//! Command-line interface for obralog.
//!
//! This module provides the CLI structure for the `obralog` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, FiscalizacaoAddArgs, FiscalizacaoCommand, ObraAddArgs, ObraCommand,
    ObraEditArgs, StatusArg, StatusCommand,
};

/// obralog - Construction-site and inspection records, kept locally
///
/// Registers construction sites ("obras") and periodic inspections
/// ("fiscalizações") against them, storing everything in an on-device
/// database with optional location and photo capture.
#[derive(Debug, Parser)]
#[command(name = "obralog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage construction sites
    #[command(subcommand)]
    Obra(ObraCommand),

    /// Manage inspections
    #[command(subcommand)]
    Fiscalizacao(FiscalizacaoCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
