//! Command-line interface
//!
//! Runs either connector from a terminal: print its config schema,
//! check credentials, fetch a day of activity or enrich a context.

mod commands;
mod runner;

pub use commands::{Cli, Commands, ConnectorKind};
pub use runner::Runner;
