// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query expansion through the synonym table.

use std::collections::HashSet;

use crate::dataset::SynonymTable;
use crate::text::normalize;

/// Expand `query` into distinct alternate search strings, first occurrence
/// wins: the trimmed query, its normalized form (if different), aliases keyed
/// by the trimmed query, then aliases keyed by the normalized query.
pub fn expand_query(query: &str, synonyms: &SynonymTable) -> Vec<String> {
    let base = query.trim();
    if base.is_empty() {
        return Vec::new();
    }
    let normalized = normalize(base);

    let mut candidates: Vec<&str> = vec![base];
    if normalized != base {
        candidates.push(&normalized);
    }
    if let Some(aliases) = synonyms.get(base) {
        candidates.extend(aliases.iter().map(String::as_str));
    }
    if let Some(aliases) = synonyms.get(&normalized) {
        candidates.extend(aliases.iter().map(String::as_str));
    }

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_preserving_order() {
        let table: SynonymTable = [("A", vec!["B", "B", "C"])].into_iter().collect();
        // "a" is the normalized form of "A", which differs and is kept.
        assert_eq!(expand_query("A", &table), vec!["A", "a", "B", "C"]);
    }

    #[test]
    fn blank_query_expands_to_nothing() {
        assert!(expand_query("   ", &SynonymTable::new()).is_empty());
    }

    #[test]
    fn normalized_form_added_when_different() {
        let table = SynonymTable::new();
        assert_eq!(expand_query(" 커피 우유 ", &table), vec!["커피 우유", "커피우유"]);
        assert_eq!(expand_query("커피", &table), vec!["커피"]);
    }

    #[test]
    fn aliases_from_raw_and_normalized_keys() {
        let table: SynonymTable = [
            ("Iced Coffee", vec!["아이스커피"]),
            ("icedcoffee", vec!["아아", "아이스커피"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            expand_query("Iced Coffee", &table),
            vec!["Iced Coffee", "icedcoffee", "아이스커피", "아아"]
        );
    }

    #[test]
    fn lowercase_query_with_aliases() {
        let table: SynonymTable = [("a", vec!["b", "b", "c"])].into_iter().collect();
        assert_eq!(expand_query("a", &table), vec!["a", "b", "c"]);
    }
}
