// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token index: the short substrings that actually occur in food names.
//!
//! Hint extraction only trusts query fragments that appear somewhere in the
//! dataset, so the index is derived once per dataset version and reused for
//! every query.

use std::collections::HashSet;

use tracing::debug;

use crate::dataset::FoodSummary;
use crate::text::normalize;

/// Shortest substring length collected into the index.
pub const MIN_SUBSTRING_LEN: usize = 2;
/// Longest substring length collected into the index.
pub const MAX_SUBSTRING_LEN: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
    /// Every normalized 2..=4 char window of every food name.
    pub substrings: HashSet<String>,
    /// Food names that normalize to exactly one char.
    pub whole_single_char: HashSet<String>,
}

impl TokenIndex {
    /// Derive the index from a summary list. Pure and deterministic.
    pub fn build(summaries: &[FoodSummary]) -> Self {
        let mut substrings = HashSet::new();
        let mut whole_single_char = HashSet::new();

        for summary in summaries {
            let name = normalize(summary.name.trim());
            if name.is_empty() {
                continue;
            }
            let chars: Vec<char> = name.chars().collect();
            if chars.len() == 1 {
                whole_single_char.insert(name.clone());
            }
            for len in MIN_SUBSTRING_LEN..=MAX_SUBSTRING_LEN {
                for window in chars.windows(len) {
                    substrings.insert(window.iter().collect::<String>());
                }
            }
        }

        debug!(
            foods = summaries.len(),
            substrings = substrings.len(),
            single_char = whole_single_char.len(),
            "Built token index"
        );

        Self {
            substrings,
            whole_single_char,
        }
    }

    pub fn contains_substring(&self, s: &str) -> bool {
        self.substrings.contains(s)
    }

    pub fn contains_single_char(&self, s: &str) -> bool {
        self.whole_single_char.contains(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(names: &[&str]) -> Vec<FoodSummary> {
        names.iter().map(|n| FoodSummary::new(*n, vec![])).collect()
    }

    #[test]
    fn collects_all_windows_of_length_two_to_four() {
        let index = TokenIndex::build(&summaries(&["팥빙수"]));
        for s in ["팥빙", "빙수", "팥빙수"] {
            assert!(index.contains_substring(s), "{s}");
        }
        assert!(!index.contains_substring("팥"));
        assert_eq!(index.substrings.len(), 3);
    }

    #[test]
    fn windows_use_normalized_names() {
        let index = TokenIndex::build(&summaries(&["Green Tea"]));
        assert!(index.contains_substring("ntea"));
        assert!(!index.contains_substring("n t"));
    }

    #[test]
    fn single_char_names_are_tracked_separately() {
        let index = TokenIndex::build(&summaries(&["팥", " 밥 ", "팥빙수"]));
        assert!(index.contains_single_char("팥"));
        assert!(index.contains_single_char("밥"));
        assert!(!index.contains_single_char("빙"));
    }

    #[test]
    fn build_is_deterministic() {
        let list = summaries(&["커피", "커피우유", "녹차"]);
        assert_eq!(TokenIndex::build(&list), TokenIndex::build(&list));
    }
}
