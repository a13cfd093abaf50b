// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback advisory lookup

use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use mamma::advisory::{Advisor, HttpAdvisory};
use mamma::output::print_json;

#[derive(Debug, Serialize)]
struct AdvicePayload<'a> {
    query: &'a str,
    endpoint: &'a str,
    text: &'a str,
}

/// Run the advise command. Failures are printed as text, never returned.
pub async fn run(
    query: &str,
    endpoint: &str,
    timeout: Duration,
    format: OutputFormat,
    compact: bool,
) -> Result<()> {
    let advisor = Advisor::new(HttpAdvisory::new(endpoint, timeout));
    // sole submission; nothing can supersede it
    let text = advisor.submit(query).await.unwrap_or_default();

    match format {
        OutputFormat::Json => {
            let payload = AdvicePayload {
                query: query.trim(),
                endpoint,
                text: &text,
            };
            print_json(&payload, compact)?;
        }
        OutputFormat::Text => println!("{text}"),
    }
    Ok(())
}
