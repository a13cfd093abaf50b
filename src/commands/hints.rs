// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query diagnostics: normalization, expansion and hints

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{load_catalog, RunContext};
use crate::cli::OutputFormat;
use mamma::output::print_json;
use mamma::search::RankContext;

#[derive(Debug, Serialize)]
struct HintsPayload<'a> {
    query: &'a str,
    normalized: &'a str,
    expanded: &'a [String],
    hints: &'a [String],
}

/// Run the hints command
pub async fn run(ctx: &RunContext, query: &str) -> Result<()> {
    let catalog = load_catalog(&ctx.paths).await?;
    let rank = RankContext::new(query, &catalog.dataset.synonyms, &catalog.index);

    match ctx.format {
        OutputFormat::Json => {
            let payload = HintsPayload {
                query,
                normalized: &rank.normalized_query,
                expanded: &rank.expanded,
                hints: &rank.hints,
            };
            print_json(&payload, ctx.compact)?;
        }
        OutputFormat::Text => {
            println!("{} {}", "Normalized:".dimmed(), rank.normalized_query);
            println!("{} {}", "Expanded:".dimmed(), rank.expanded.join(", "));
            if rank.hints.is_empty() {
                println!("{} {}", "Hints:".dimmed(), "none".yellow());
            } else {
                println!("{} {}", "Hints:".dimmed(), rank.hints.join(", ").cyan());
            }
        }
    }
    Ok(())
}
