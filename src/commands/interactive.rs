// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-by-line search session on stdin

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::search::{print_advisory_hint, render};
use super::{load_catalog, RunContext};
use crate::cli::OutputFormat;
use mamma::analytics::{log_settled_searches, TracingSearchLogger};
use mamma::debounce::Debouncer;
use mamma::verdict_summary::VerdictTab;

/// Quiet periods for the two debounced side effects.
#[derive(Debug, Clone, Copy)]
pub struct SessionDelays {
    pub log: Duration,
    pub advisory: Duration,
}

/// Run an interactive session: every stdin line is a query. Search terms are
/// logged, and the advisory offered, only once input pauses.
pub async fn run(ctx: &RunContext, limit: usize, delays: SessionDelays) -> Result<()> {
    let catalog = load_catalog(&ctx.paths).await?;

    let (log_tx, log_rx) = Debouncer::channel(delays.log, 64);
    let logger = tokio::spawn(log_settled_searches(log_rx, &TracingSearchLogger));

    let (offer_tx, mut offer_rx) = Debouncer::<(String, bool)>::channel(delays.advisory, 64);
    let show_hints = ctx.format == OutputFormat::Text;
    let offers = tokio::spawn(async move {
        while let Some((query, offer)) = offer_rx.next().await {
            if offer && show_hints {
                print_advisory_hint(&query);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let offer = render(&catalog, &line, limit, VerdictTab::All, ctx.format, ctx.compact)?;
        // both tasks run until their senders are dropped below
        let _ = log_tx.send(line.clone()).await;
        let _ = offer_tx.send((line, offer)).await;
    }
    drop(log_tx);
    drop(offer_tx);

    let logged = logger.await?;
    offers.await?;
    debug!(logged, "Interactive session ended");
    Ok(())
}
