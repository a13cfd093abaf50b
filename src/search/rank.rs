// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bucketed rank keys.
//!
//! Each candidate lands in the first bucket whose structural test it passes;
//! buckets are compared first, then the within-bucket score. Bucket scores are
//! offset by large constants so the numbers stay readable in `--format json`
//! output, but ordering never relies on the offsets alone.

use serde::Serialize;
use std::cmp::Ordering;

use super::expand::expand_query;
use super::hints::extract_hints;
use super::index::TokenIndex;
use super::relevance::relevance;
use crate::dataset::{FoodSummary, SynonymTable};
use crate::text::{
    char_index_of, char_len, contains_at_hangul_boundary, normalize, trailing_hangul_run,
};

const EXACT_BASE: f64 = 1_000_000.0;

const HINT_WHOLE_BASE: f64 = 500_000.0;
const HINT_WHOLE_ORDER_BONUS: f64 = 10_000.0;
const HINT_WHOLE_ORDER_STEP: f64 = 500.0;
const HINT_WHOLE_LEN_WEIGHT: f64 = 50.0;

const HINT_CONTAINED_BASE: f64 = 200_000.0;
const HINT_CONTAINED_ORDER_BONUS: f64 = 5_000.0;
const HINT_CONTAINED_ORDER_STEP: f64 = 300.0;
const HINT_CONTAINED_LEN_WEIGHT: f64 = 200.0;
const HINT_BOUNDARY_BONUS: f64 = 2_000.0;

const SYNONYM_BOUNDARY_BASE: f64 = 80_000.0;

const SUBSTRING_BASE: f64 = 10_000.0;
const TRAILING_RUN_PENALTY: f64 = 120.0;

/// Ranking tier; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Normalized name equals normalized query.
    Exact = 0,
    /// An extracted hint is the whole name.
    HintWhole = 1,
    /// The name contains an extracted hint.
    HintContained = 2,
    /// A synonym variant matches at a Hangul word boundary.
    SynonymBoundary = 3,
    /// The raw query is a case-insensitive substring of the name.
    Substring = 4,
    /// No structural match.
    Fallback = 9,
}

impl Bucket {
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Sortable per-candidate key for one query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankKey {
    pub bucket: Bucket,
    pub score: f64,
    /// Name length in chars; shorter wins among equal scores.
    pub name_len: usize,
    /// The summary's rounded dataset score; final tie-break, higher wins.
    pub score_rounded: i64,
}

impl RankKey {
    /// Total order: bucket asc, score desc, name length asc, dataset score desc.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        self.bucket
            .cmp(&other.bucket)
            .then_with(|| other.score.total_cmp(&self.score))
            .then_with(|| self.name_len.cmp(&other.name_len))
            .then_with(|| other.score_rounded.cmp(&self.score_rounded))
    }
}

/// Per-query values shared by every candidate.
#[derive(Debug, Clone)]
pub struct RankContext {
    pub query: String,
    pub normalized_query: String,
    /// Expanded variants, the query itself first.
    pub expanded: Vec<String>,
    /// Ordered hints from [`extract_hints`].
    pub hints: Vec<String>,
}

impl RankContext {
    pub fn new(query: &str, synonyms: &SynonymTable, index: &TokenIndex) -> Self {
        Self {
            query: query.to_string(),
            normalized_query: normalize(query),
            expanded: expand_query(query, synonyms),
            hints: extract_hints(query, index),
        }
    }

    /// Candidate filter: exact normalized match, or the normalized name
    /// contains some expanded variant or some hint.
    pub fn admits(&self, normalized_name: &str) -> bool {
        normalized_name == self.normalized_query
            || self
                .expanded
                .iter()
                .any(|variant| normalized_name.contains(normalize(variant).as_str()))
            || self
                .hints
                .iter()
                .any(|hint| normalized_name.contains(hint.as_str()))
    }

    /// Compute the rank key of `summary` for this query.
    pub fn rank_key(&self, summary: &FoodSummary) -> RankKey {
        let name = summary.name.as_str();
        let normalized_name = normalize(name);
        let score_rounded = summary.score_rounded();
        let dataset_score = score_rounded as f64;
        let key = |bucket: Bucket, score: f64| RankKey {
            bucket,
            score,
            name_len: char_len(name),
            score_rounded,
        };

        if normalized_name == self.normalized_query {
            return key(Bucket::Exact, EXACT_BASE + dataset_score);
        }

        if let Some((order, hint)) = self
            .hints
            .iter()
            .enumerate()
            .find(|(_, hint)| normalize(hint) == normalized_name)
        {
            let bonus = HINT_WHOLE_ORDER_BONUS - order as f64 * HINT_WHOLE_ORDER_STEP
                + char_len(hint) as f64 * HINT_WHOLE_LEN_WEIGHT;
            return key(Bucket::HintWhole, HINT_WHOLE_BASE + bonus + dataset_score);
        }

        let best_contained = self
            .hints
            .iter()
            .enumerate()
            .filter_map(|(order, hint)| {
                char_index_of(&normalized_name, &normalize(hint)).map(|pos| (order, pos, hint))
            })
            .min_by_key(|(order, pos, _)| (*order, *pos));
        if let Some((order, _, hint)) = best_contained {
            let boundary = if contains_at_hangul_boundary(name, hint) {
                HINT_BOUNDARY_BONUS
            } else {
                0.0
            };
            let bonus = HINT_CONTAINED_ORDER_BONUS - order as f64 * HINT_CONTAINED_ORDER_STEP
                + char_len(hint) as f64 * HINT_CONTAINED_LEN_WEIGHT
                + boundary;
            return key(
                Bucket::HintContained,
                HINT_CONTAINED_BASE + bonus + relevance(name, &self.query, dataset_score),
            );
        }

        let synonym_hit = self
            .expanded
            .iter()
            .filter(|variant| normalize(variant) != self.normalized_query)
            .any(|variant| contains_at_hangul_boundary(name, variant));
        if synonym_hit {
            return key(
                Bucket::SynonymBoundary,
                SYNONYM_BOUNDARY_BASE + relevance(name, &self.query, dataset_score),
            );
        }

        let trimmed = self.query.trim();
        if name.to_lowercase().contains(&trimmed.to_lowercase()) {
            let penalty = TRAILING_RUN_PENALTY * trailing_hangul_run(name, trimmed) as f64;
            return key(
                Bucket::Substring,
                SUBSTRING_BASE + relevance(name, &self.query, dataset_score) - penalty,
            );
        }

        key(Bucket::Fallback, relevance(name, &self.query, dataset_score))
    }
}
