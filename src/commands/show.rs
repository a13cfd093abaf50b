// SPDX-License-Identifier: MIT OR Apache-2.0

//! Full source listing for one food

use anyhow::{bail, Result};
use colored::Colorize;

use super::{load_catalog, print_food_details, FoodView, RunContext};
use crate::cli::OutputFormat;
use mamma::errors::suggestions::unknown_food_suggestion;
use mamma::output::print_json;
use mamma::verdict_summary::VerdictTab;

/// Run the show command
pub async fn run(ctx: &RunContext, food: &str, tab: VerdictTab) -> Result<()> {
    let catalog = load_catalog(&ctx.paths).await?;
    let Some(summary) = catalog.dataset.find(food) else {
        bail!(unknown_food_suggestion(food.trim()));
    };
    let view = FoodView::new(summary, tab);

    match ctx.format {
        OutputFormat::Json => print_json(&view, ctx.compact)?,
        OutputFormat::Text => {
            println!(
                "\n{}  {}",
                view.name.bold(),
                format!(
                    "{} sources, score {:.2}",
                    summary.entries.len(),
                    view.weighted_score
                )
                .dimmed()
            );
            print_food_details(&view);
        }
    }
    Ok(())
}
