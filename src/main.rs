// SPDX-License-Identifier: MIT OR Apache-2.0

//! mamma - Pregnancy food-safety lookup
//!
//! Ranks foods from a reliability-weighted source table against free-text
//! Korean/English queries.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use commands::RunContext;
use mamma::config::{Config, ConfigOutputFormat};

/// Env var holding the tracing filter directive
const LOG_ENV: &str = "MAMMA_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load();

    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });
    let ctx = RunContext {
        format,
        compact: cli.compact,
        paths: config.dataset_paths(cli.foods, cli.synonyms),
    };

    match cli.command {
        Commands::Search {
            query,
            limit,
            verdict,
        } => {
            let limit = config.merge_max_results(limit);
            commands::search::run(&ctx, &query, limit, verdict.unwrap_or_default()).await?;
        }
        Commands::Show { food, verdict } => {
            commands::show::run(&ctx, &food, verdict.unwrap_or_default()).await?;
        }
        Commands::Hints { query } => {
            commands::hints::run(&ctx, &query).await?;
        }
        Commands::Stats => {
            commands::stats::run(&ctx).await?;
        }
        Commands::Advise { query, endpoint } => {
            let endpoint = endpoint.as_deref().unwrap_or(config.advisory_endpoint());
            commands::advise::run(
                &query,
                endpoint,
                config.advisory_timeout(),
                ctx.format,
                ctx.compact,
            )
            .await?;
        }
        Commands::Interactive { limit } => {
            let limit = config.merge_max_results(limit);
            let delays = commands::interactive::SessionDelays {
                log: config.log_delay(),
                advisory: config.advisory_delay(),
            };
            commands::interactive::run(&ctx, limit, delays).await?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "mamma", &mut std::io::stdout());
        }
    }

    Ok(())
}
