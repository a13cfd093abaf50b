// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hint extraction: find dataset-validated food mentions inside free text.
//!
//! A query like "임신 중 팥빙수 먹어도 되나요" never equals a food name, but
//! some of its 2..=4 char windows do occur in the dataset. Those windows (and
//! whole one-char food names) are the hints.

use std::collections::HashSet;

use super::index::{TokenIndex, MAX_SUBSTRING_LEN, MIN_SUBSTRING_LEN};
use crate::text::{char_index_of, normalize};

/// Extract hints from `query`, ordered by first position in the normalized
/// query, longer hints first at equal position.
///
/// Single-char hints contained in a longer hint are dropped.
pub fn extract_hints(query: &str, index: &TokenIndex) -> Vec<String> {
    let normalized = normalize(query);
    if normalized.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = normalized.chars().collect();

    let mut multi: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    for len in MIN_SUBSTRING_LEN..=MAX_SUBSTRING_LEN {
        for window in chars.windows(len) {
            let sub: String = window.iter().collect();
            if index.contains_substring(&sub) && seen.insert(sub.clone()) {
                multi.push(sub);
            }
        }
    }

    let mut single: Vec<String> = Vec::new();
    for ch in &chars {
        let s = ch.to_string();
        if index.contains_single_char(&s) && seen.insert(s.clone()) {
            single.push(s);
        }
    }
    if !multi.is_empty() {
        single.retain(|one| !multi.iter().any(|hint| hint.contains(one.as_str())));
    }

    let mut hints: Vec<(usize, usize, String)> = multi
        .into_iter()
        .chain(single)
        .map(|hint| {
            let pos = char_index_of(&normalized, &hint).unwrap_or(usize::MAX);
            let len = hint.chars().count();
            (pos, len, hint)
        })
        .collect();
    hints.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));
    hints.into_iter().map(|(_, _, hint)| hint).collect()
}
