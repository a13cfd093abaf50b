// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synonym table: canonical key → alias list.

use std::collections::HashMap;

use super::ingest::RawSynonymRow;

/// Immutable alias lookup. Alias order within a list is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    aliases: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded rows. Blank keys are skipped; aliases are split on
    /// `|`, trimmed, and aliases that are blank or equal to the key are dropped.
    /// A repeated key replaces the earlier row.
    pub fn from_rows(rows: &[RawSynonymRow]) -> Self {
        let mut aliases = HashMap::new();
        for row in rows {
            let key = row.key.trim();
            if key.is_empty() {
                continue;
            }
            let list: Vec<String> = row
                .aliases
                .trim()
                .trim_matches('"')
                .split('|')
                .map(str::trim)
                .filter(|alias| !alias.is_empty() && *alias != key)
                .map(str::to_string)
                .collect();
            aliases.insert(key.to_string(), list);
        }
        Self { aliases }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.aliases.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SynonymTable
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let aliases = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { aliases }
    }
}
