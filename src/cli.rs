// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use mamma::errors::UnknownVerdictError;
use mamma::verdict_summary::VerdictTab;

/// mamma - Pregnancy food-safety lookup
///
/// Summarizes what multiple sources say about eating a food during
/// pregnancy, weighted by how reliable each source is.
#[derive(Parser, Debug)]
#[command(name = "mamma")]
#[command(
    author,
    version,
    about,
    long_about = None,
    override_usage = "mamma [OPTIONS] <COMMAND>",
    after_help = "Quickstart:\n  mamma s 커피\n  mamma search \"임신 중 팥빙수 먹어도 돼요\" --verdict avoid\n  mamma show 커피우유\n\nDataset:\n  mamma --foods data/foods.csv --synonyms data/synonyms.csv stats"
)]
pub struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Compact JSON output (no pretty formatting)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Food table CSV (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub foods: Option<PathBuf>,

    /// Synonym table CSV (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub synonyms: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_verdict_tab(raw: &str) -> Result<VerdictTab, String> {
    VerdictTab::parse(raw).ok_or_else(|| {
        UnknownVerdictError {
            value: raw.to_string(),
        }
        .to_string()
    })
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search foods by name or free-text question
    #[command(visible_aliases = ["s", "find"])]
    Search {
        /// Food name or question (Korean or English)
        query: String,

        /// Maximum number of results to show
        #[arg(short = 'm', long = "limit")]
        limit: Option<usize>,

        /// Only list sources with this verdict (all, safe, conditional, caution, avoid)
        #[arg(short = 'v', long, value_parser = parse_verdict_tab)]
        verdict: Option<VerdictTab>,
    },

    /// Show every source for one food
    #[command(visible_aliases = ["sh"])]
    Show {
        /// Exact food name
        food: String,

        /// Only list sources with this verdict (all, safe, conditional, caution, avoid)
        #[arg(short = 'v', long, value_parser = parse_verdict_tab)]
        verdict: Option<VerdictTab>,
    },

    /// Show hint extraction and query expansion for a query
    Hints {
        /// Query to analyze
        query: String,
    },

    /// Print dataset counts
    Stats,

    /// Ask the fallback advisory service about a query
    #[command(visible_aliases = ["ask"])]
    Advise {
        /// Question to forward
        query: String,

        /// Advisory endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Read queries from stdin, one per line
    #[command(visible_aliases = ["i"])]
    Interactive {
        /// Maximum number of results per query
        #[arg(short = 'm', long = "limit")]
        limit: Option<usize>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
