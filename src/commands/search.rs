// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ranked food search

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use super::{load_catalog, print_food_details, FoodView, RunContext};
use crate::cli::OutputFormat;
use mamma::analytics::{loggable_term, SearchLogger, TracingSearchLogger};
use mamma::catalog::ReadyCatalog;
use mamma::errors::suggestions::no_results_suggestion;
use mamma::output::print_json;
use mamma::search::{should_offer_advisory, Bucket, SearchOutcome};
use mamma::verdict_summary::VerdictTab;

/// One ranked food for JSON output
#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    rank: usize,
    bucket: Bucket,
    rank_score: f64,
    #[serde(flatten)]
    food: FoodView<'a>,
}

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    query: &'a str,
    strong_match: bool,
    offer_advisory: bool,
    hints: &'a [String],
    expanded: &'a [String],
    total: usize,
    results: Vec<SearchHit<'a>>,
}

/// Advisory is offered for queries of two or more chars lacking a strong
/// match.
pub fn offer_advisory(query: &str, outcome: &SearchOutcome<'_>) -> bool {
    loggable_term(query).is_some() && should_offer_advisory(query, outcome)
}

/// Run the search command
pub async fn run(
    ctx: &RunContext,
    query: &str,
    limit: usize,
    tab: VerdictTab,
) -> Result<()> {
    let catalog = load_catalog(&ctx.paths).await?;
    if let Some(term) = loggable_term(query) {
        TracingSearchLogger.log_search(term);
    }
    let offer = render(&catalog, query, limit, tab, ctx.format, ctx.compact)?;
    if offer && ctx.format == OutputFormat::Text {
        print_advisory_hint(query);
    }
    Ok(())
}

pub fn print_advisory_hint(query: &str) {
    println!(
        "{} No close match. Ask the advisory service: mamma advise \"{}\"",
        "💡".yellow(),
        query.trim()
    );
}

/// Search a loaded catalog and print the results. Returns whether the
/// advisory should be offered.
pub fn render(
    catalog: &ReadyCatalog,
    query: &str,
    limit: usize,
    tab: VerdictTab,
    format: OutputFormat,
    compact: bool,
) -> Result<bool> {
    let outcome = catalog.search(query);
    let offer = offer_advisory(query, &outcome);
    debug!(
        query,
        results = outcome.results.len(),
        strong_match = outcome.strong_match,
        offer_advisory = offer,
        "Search finished"
    );

    match format {
        OutputFormat::Json => {
            let results = outcome
                .results
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, hit)| SearchHit {
                    rank: i + 1,
                    bucket: hit.key.bucket,
                    rank_score: hit.key.score,
                    food: FoodView::new(hit.summary, tab),
                })
                .collect();
            let payload = SearchPayload {
                query: query.trim(),
                strong_match: outcome.strong_match,
                offer_advisory: offer,
                hints: &outcome.hints,
                expanded: &outcome.expanded,
                total: outcome.results.len(),
                results,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => {
            if query.trim().is_empty() {
                println!("{} Type a food name to search", "✗".red());
                return Ok(false);
            }
            if outcome.is_empty() {
                println!("{} {}", "✗".red(), no_results_suggestion(query.trim()));
            } else {
                println!("\n{} Results for: {}\n", "🔍".cyan(), query.trim().yellow());
                for (i, hit) in outcome.results.iter().take(limit).enumerate() {
                    let view = FoodView::new(hit.summary, tab);
                    println!(
                        "{:>3}. {}  {}",
                        i + 1,
                        view.name.bold(),
                        format!("score {}/3", view.score_rounded).dimmed()
                    );
                    print_food_details(&view);
                    println!();
                }
                println!(
                    "{} Found {} foods",
                    "✓".green(),
                    outcome.results.len().to_string().cyan()
                );
            }
        }
    }

    Ok(offer)
}
