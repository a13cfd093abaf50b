// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group raw food rows into per-food summaries.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::ingest::RawFoodRow;
use super::model::{FoodSummary, SourceEntry, Verdict};

pub const MIN_RELIABILITY: f64 = 0.5;
pub const MAX_RELIABILITY: f64 = 5.0;
const DEFAULT_RELIABILITY: f64 = 1.0;

/// Parse a reliability cell: numbers are clamped to `[0.5, 5.0]`, tier labels
/// map to 3/2/1, anything else is 1.0.
pub fn parse_reliability(raw: &str) -> f64 {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return DEFAULT_RELIABILITY;
    }
    if let Ok(value) = s.parse::<f64>() {
        if value.is_nan() {
            return DEFAULT_RELIABILITY;
        }
        return value.clamp(MIN_RELIABILITY, MAX_RELIABILITY);
    }
    match s.as_str() {
        "high" | "gov" | "medical" => 3.0,
        "medium" | "mid" | "news" => 2.0,
        "low" | "blog" => 1.0,
        _ => DEFAULT_RELIABILITY,
    }
}

/// Boolean-like flag cell.
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "y" | "yes" | "있음"
    )
}

fn entry_from_row(row: &RawFoodRow) -> Option<SourceEntry> {
    if !is_truthy(&row.has_info) {
        return None;
    }
    let verdict = Verdict::from_label(&row.verdict_label)?;
    let url = Some(row.url.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    Some(SourceEntry {
        source_name: row.source_name.trim().to_string(),
        verdict,
        reliability: parse_reliability(&row.reliability),
        note: Some(row.verdict_label.clone()),
        url,
    })
}

/// Most severe verdict wins; equal severity falls back to higher reliability.
fn stronger(a: &SourceEntry, b: &SourceEntry) -> Ordering {
    a.verdict
        .severity()
        .cmp(&b.verdict.severity())
        .then_with(|| {
            a.reliability
                .partial_cmp(&b.reliability)
                .unwrap_or(Ordering::Equal)
        })
}

/// Keep one entry per [`SourceEntry::dedup_key`]. Ties keep the first seen.
pub fn dedup_entries(entries: Vec<SourceEntry>) -> Vec<SourceEntry> {
    let mut order: Vec<String> = Vec::new();
    let mut best: HashMap<String, SourceEntry> = HashMap::new();

    for entry in entries {
        let key = entry.dedup_key();
        match best.get_mut(&key) {
            Some(current) => {
                if stronger(&entry, current) == Ordering::Greater {
                    *current = entry;
                }
            }
            None => {
                order.push(key.clone());
                best.insert(key, entry);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| best.remove(&key))
        .collect()
}

/// Build one [`FoodSummary`] per distinct non-blank food name, sorted by name.
///
/// Rows without the has-info flag or with an unrecognized verdict are dropped.
/// A food whose rows are all dropped still yields a summary with no entries.
pub fn aggregate(rows: &[RawFoodRow]) -> Vec<FoodSummary> {
    let mut grouped: BTreeMap<&str, Vec<&RawFoodRow>> = BTreeMap::new();
    for row in rows {
        let name = row.food_name.trim();
        if name.is_empty() {
            continue;
        }
        grouped.entry(name).or_default().push(row);
    }

    let mut dropped = 0usize;
    let summaries: Vec<FoodSummary> = grouped
        .into_iter()
        .map(|(name, items)| {
            let entries: Vec<SourceEntry> = items
                .iter()
                .filter_map(|row| {
                    let entry = entry_from_row(row);
                    if entry.is_none() {
                        dropped += 1;
                    }
                    entry
                })
                .collect();

            let mut entries = dedup_entries(entries);
            entries.sort_by(|a, b| {
                b.reliability
                    .partial_cmp(&a.reliability)
                    .unwrap_or(Ordering::Equal)
            });
            FoodSummary::new(name, entries)
        })
        .collect();

    debug!(
        rows = rows.len(),
        foods = summaries.len(),
        dropped,
        "Aggregated food rows"
    );
    summaries
}
