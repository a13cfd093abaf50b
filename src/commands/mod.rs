// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations, one `run` per command.

pub mod advise;
pub mod hints;
pub mod interactive;
pub mod search;
pub mod show;
pub mod stats;

use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use mamma::catalog::{Catalog, CatalogState, ReadyCatalog};
use mamma::dataset::{DatasetPaths, SourceEntry};
use mamma::errors::DatasetNotFoundError;
use mamma::output::{reliability_bar, signal_colored, verdict_colored};
use mamma::verdict_summary::{source_listing, Digest, VerdictTab};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub format: OutputFormat,
    pub compact: bool,
    pub paths: DatasetPaths,
}

/// Load the dataset and wait for it; a failed load becomes a
/// [`DatasetNotFoundError`].
pub async fn load_catalog(paths: &DatasetPaths) -> Result<ReadyCatalog> {
    let mut catalog = Catalog::spawn_load(paths.clone());
    match catalog.settled().await {
        CatalogState::Ready(ready) => Ok(ready),
        CatalogState::Failed(reason) => Err(DatasetNotFoundError {
            foods_path: paths.foods.display().to_string(),
            synonyms_path: paths.synonyms.display().to_string(),
            reason,
        }
        .into()),
        CatalogState::Loading => bail!("dataset load did not finish"),
    }
}

/// JSON view of one food: digest plus the filtered source list.
#[derive(Debug, Serialize)]
pub struct FoodView<'a> {
    pub name: &'a str,
    pub weighted_score: f64,
    pub score_rounded: i64,
    #[serde(flatten)]
    pub digest: Digest,
    pub sources: Vec<&'a SourceEntry>,
}

impl<'a> FoodView<'a> {
    pub fn new(summary: &'a mamma::dataset::FoodSummary, tab: VerdictTab) -> Self {
        Self {
            name: &summary.name,
            weighted_score: summary.weighted_score(),
            score_rounded: summary.score_rounded(),
            digest: Digest::of(&summary.entries),
            sources: source_listing(&summary.entries, tab),
        }
    }
}

/// Print the digest and source list of one food, indented under a heading.
pub fn print_food_details(view: &FoodView<'_>) {
    if let Some(signal) = view.digest.signal {
        println!("    {}", signal_colored(signal));
    }
    if !view.digest.summary.is_empty() {
        println!("    {}", view.digest.summary);
    }
    for group in &view.digest.groups {
        let line = match group.signal {
            Some(signal) => format!(
                "{} (Safe {} · Conditional {} · Caution {} · Avoid {})",
                signal.label(),
                group.counts.safe,
                group.counts.conditional,
                group.counts.caution,
                group.counts.avoid
            ),
            None => "No data".dimmed().to_string(),
        };
        println!("    {:<26} {}", group.title.dimmed(), line);
    }
    if view.sources.is_empty() {
        println!("    {}", "No sources for this verdict".dimmed());
        return;
    }
    for entry in &view.sources {
        let url = entry.url.as_deref().unwrap_or("");
        println!(
            "      {:<12} {} {} {}",
            verdict_colored(entry.verdict),
            reliability_bar(entry.reliability),
            entry.source_name.cyan(),
            url.dimmed()
        );
    }
}
