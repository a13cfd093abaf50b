// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dataset module - CSV ingestion, per-food aggregation and synonym tables

pub mod aggregate;
pub mod error;
pub mod ingest;
pub mod loader;
pub mod model;
pub mod synonyms;

pub use aggregate::{aggregate, parse_reliability};
pub use error::LoadError;
pub use ingest::{RawFoodRow, RawSynonymRow};
pub use loader::{load, Dataset, DatasetPaths};
pub use model::{FoodSummary, SourceEntry, Verdict};
pub use synonyms::SynonymTable;
