//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pulse Connectors CLI
#[derive(Parser, Debug)]
#[command(name = "pulse-connectors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which connector to run
    #[arg(short = 'n', long, global = true, default_value = "github")]
    pub connector: ConnectorKind,

    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON (takes precedence over --config)
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConnectorKind {
    /// GitHub events connector
    Github,
    /// Slack messages connector
    Slack,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the connector's configuration schema
    Spec,

    /// Test credentials against the vendor API
    Check,

    /// Fetch one day of normalized activity
    Fetch {
        /// Target date (RFC3339 or YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// Enrich a single context
    Enrich {
        /// Context JSON to enrich
        #[arg(long)]
        context_json: Option<String>,

        /// File containing the context JSON
        #[arg(long)]
        context: Option<PathBuf>,
    },
}
