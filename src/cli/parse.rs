//! CLI parse: clap types for homeplan. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// homeplan - home purchase plans from survey answers
#[derive(Parser)]
#[command(name = "homeplan")]
#[command(about = "Generate home purchase plans from survey answers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Generate a plan through the provider, degrading to cache or fallback
    Plan {
        /// Survey JSON file
        #[arg(long)]
        survey: PathBuf,
        /// Pretty-print the plan JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Build the offline fallback plan without calling the provider
    Fallback {
        /// Survey JSON file
        #[arg(long)]
        survey: PathBuf,
        /// Pretty-print the plan JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the survey fingerprint
    Fingerprint {
        /// Survey JSON file
        #[arg(long)]
        survey: PathBuf,
    },
    /// List stored plan records, newest last
    Records {
        /// Maximum number of records to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
