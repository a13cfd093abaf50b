// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search-term logging collaborator.

use tracing::info;

use crate::debounce::Debouncer;

/// Trimmed queries shorter than this are never logged.
pub const MIN_LOGGED_QUERY_CHARS: usize = 2;

pub trait SearchLogger: Send + Sync {
    fn log_search(&self, term: &str);
}

/// Emits one `tracing` event per logged term under `mamma::analytics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSearchLogger;

impl SearchLogger for TracingSearchLogger {
    fn log_search(&self, term: &str) {
        info!(target: "mamma::analytics", term, "search");
    }
}

/// The term to log for `query`, if any.
pub fn loggable_term(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= MIN_LOGGED_QUERY_CHARS).then_some(trimmed)
}

/// Drain `queries`, logging each settled query that is long enough.
/// Returns how many terms were logged.
pub async fn log_settled_searches<L: SearchLogger + ?Sized>(
    mut queries: Debouncer<String>,
    logger: &L,
) -> usize {
    let mut logged = 0;
    while let Some(query) = queries.next().await {
        if let Some(term) = loggable_term(&query) {
            logger.log_search(term);
            logged += 1;
        }
    }
    logged
}
