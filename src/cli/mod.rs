//! CLI module for Geo Lookup
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `lookup`: one-shot queries printed as JSON

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

/// Geo Lookup - keyword, postal code, state and proximity search
#[derive(Parser)]
#[command(name = "geo-lookup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Run a single lookup and print the result as JSON
    Lookup(lookup::LookupArgs),
}
