// SPDX-License-Identifier: MIT OR Apache-2.0

//! mamma - Pregnancy food-safety lookup library
//!
//! Aggregates per-source verdicts from CSV tables into per-food summaries and
//! ranks them against free-text Korean/English queries using synonym
//! expansion, dataset-validated hints and bucketed scoring.

pub mod advisory;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod debounce;
pub mod errors;
pub mod output;
pub mod search;
pub mod text;
pub mod verdict_summary;
