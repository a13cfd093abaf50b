// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search pipeline: token index, query expansion, hint extraction, relevance
//! scoring and bucketed ranking.
//!
//! Everything here is pure: the same (query, summaries, synonyms, index)
//! always yields the same ordered results.

pub mod expand;
pub mod hints;
pub mod index;
pub mod pipeline;
pub mod rank;
pub mod relevance;

pub use expand::expand_query;
pub use hints::extract_hints;
pub use index::TokenIndex;
pub use pipeline::{
    is_strong_match, rank_candidates, search, should_offer_advisory, RankedFood, SearchOutcome,
};
pub use rank::{Bucket, RankContext, RankKey};
pub use relevance::relevance;
