//! Command-line interface definition for Skygraph
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the HTTP service command and a one-shot fetch command.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skygraph - contribution calendar scraping service
///
/// Scrapes a public contribution calendar with a headless Chromium
/// browser and serves it as JSON for the skyline renderer.
#[derive(Parser, Debug, Clone)]
#[command(name = "skygraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Path to a Chrome/Chromium executable (overrides autodetection)
    #[arg(long, env = "SKYGRAPH_CHROME")]
    pub chrome: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Skygraph
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP scraping service
    Serve {
        /// Override the listen address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the listen port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scrape one contribution graph and print it as JSON
    Fetch {
        /// Account handle (a mention sigil is stripped)
        name: String,

        /// Range start, ISO date (honored only together with --to)
        #[arg(long)]
        from: Option<String>,

        /// Range end, ISO date (honored only together with --from)
        #[arg(long)]
        to: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
