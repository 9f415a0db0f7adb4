// Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "rosteriq",
    version,
    about = "Fantasy football roster analysis against replacement baselines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a roster: lineup, grades, and projected season outcome.
    Analyze {
        /// Sleeper league id to import (defaults to the configured league).
        #[arg(long)]
        league: Option<String>,

        /// Only analyze the imported team whose owner matches this name.
        #[arg(long, requires = "league")]
        team: Option<String>,

        /// Comma-separated player names for an ad-hoc roster.
        #[arg(long, conflicts_with_all = ["league", "names_file"])]
        names: Option<String>,

        /// File with one player name per line.
        #[arg(long, value_name = "PATH", conflicts_with = "league")]
        names_file: Option<PathBuf>,

        /// Load the catalog from a CSV snapshot instead of the network feed.
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,

        /// Emit the analysis as JSON instead of a report.
        #[arg(long)]
        json: bool,

        /// Include generated narratives (rule-based when no API key is set).
        #[arg(long)]
        narrative: bool,
    },

    /// Fetch (or load) the player catalog and print a summary.
    Catalog {
        /// Write the catalog to a CSV snapshot after loading.
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,

        /// Season year (defaults to the current NFL season).
        #[arg(long)]
        season: Option<u16>,

        /// Scoring format: ppr, half_ppr, or standard.
        #[arg(long)]
        format: Option<String>,

        /// Load from a CSV snapshot instead of the network feed.
        #[arg(long, value_name = "PATH")]
        snapshot: Option<PathBuf>,
    },
}

/// Split a `--names` argument into individual player names.
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
