// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset counts

use anyhow::Result;
use serde::Serialize;

use super::{load_catalog, RunContext};
use crate::cli::OutputFormat;
use mamma::catalog::CatalogStats;
use mamma::output::print_json;

#[derive(Debug, Serialize)]
struct StatsPayload {
    #[serde(flatten)]
    stats: CatalogStats,
    synonym_keys: usize,
    fingerprint: String,
}

/// Run the stats command
pub async fn run(ctx: &RunContext) -> Result<()> {
    let catalog = load_catalog(&ctx.paths).await?;
    let payload = StatsPayload {
        stats: catalog.stats(),
        synonym_keys: catalog.dataset.synonyms.len(),
        fingerprint: mamma::catalog::dataset_fingerprint(&catalog.dataset.summaries)
            .to_hex()
            .to_string(),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&payload, ctx.compact)?,
        OutputFormat::Text => {
            println!("Foods: {}", payload.stats.foods);
            println!("Sources: {}", payload.stats.sources);
            println!("Synonym keys: {}", payload.synonym_keys);
            println!("Fingerprint: {}", payload.fingerprint);
        }
    }
    Ok(())
}
