// SPDX-License-Identifier: MIT OR Apache-2.0

//! Continuous relevance between a candidate name and the query.

use std::collections::HashSet;

use crate::text::{normalize, whitespace_tokens};

const EXACT_BASE: f64 = 1000.0;
const PREFIX_BONUS: f64 = 200.0;
const CONTAINS_BONUS: f64 = 120.0;
const TOKEN_OVERLAP_WEIGHT: f64 = 100.0;
const LENGTH_PROXIMITY_WEIGHT: f64 = 80.0;
const DATASET_SCORE_WEIGHT: f64 = 10.0;

fn lowercase_tokens(s: &str) -> HashSet<String> {
    whitespace_tokens(s)
        .into_iter()
        .map(str::to_lowercase)
        .collect()
}

/// Blend of exactness, prefix/containment, shared whitespace tokens, length
/// proximity and the dataset score.
pub fn relevance(name: &str, query: &str, dataset_score: f64) -> f64 {
    let n = normalize(name);
    let q = normalize(query);
    if n == q {
        return EXACT_BASE + dataset_score;
    }

    let mut score = 0.0;
    if n.starts_with(&q) {
        score += PREFIX_BONUS;
    }
    if n.contains(&q) {
        score += CONTAINS_BONUS;
    }

    let query_tokens = lowercase_tokens(query);
    if !query_tokens.is_empty() {
        let name_tokens = lowercase_tokens(name);
        let shared = name_tokens.intersection(&query_tokens).count() as f64;
        score += TOKEN_OVERLAP_WEIGHT * (shared / query_tokens.len().max(1) as f64);
    }

    let extra_len = n.chars().count().saturating_sub(q.chars().count());
    score += LENGTH_PROXIMITY_WEIGHT / (1 + extra_len) as f64;
    score += dataset_score * DATASET_SCORE_WEIGHT;
    score
}
