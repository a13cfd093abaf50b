// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data model: verdicts, per-source entries and per-food summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source's stance on eating a food during pregnancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Safe,
    Conditional,
    Caution,
    Avoid,
}

impl Verdict {
    /// Normalize a raw label (English or Korean) to a canonical verdict.
    ///
    /// Returns `None` for anything unrecognized; such rows are dropped at
    /// ingestion.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "avoid" | "피해야 함" | "피함" => Some(Verdict::Avoid),
            "caution" | "주의" => Some(Verdict::Caution),
            "conditional" | "조건부" => Some(Verdict::Conditional),
            "safe" | "안전" | "none" | "없음" => Some(Verdict::Safe),
            _ => None,
        }
    }

    /// Contribution to the weighted score: Avoid=0 .. Safe=3.
    pub fn score(self) -> f64 {
        match self {
            Verdict::Avoid => 0.0,
            Verdict::Caution => 1.0,
            Verdict::Conditional => 2.0,
            Verdict::Safe => 3.0,
        }
    }

    /// Severity order used for deduplication and source listings:
    /// Avoid=3 > Caution=2 > Conditional=1 > Safe=0.
    pub fn severity(self) -> u8 {
        match self {
            Verdict::Avoid => 3,
            Verdict::Caution => 2,
            Verdict::Conditional => 1,
            Verdict::Safe => 0,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Safe => "Safe",
            Verdict::Conditional => "Conditional",
            Verdict::Caution => "Caution",
            Verdict::Avoid => "Avoid",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One opinion from one source about one food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub source_name: String,
    pub verdict: Verdict,
    /// Trust weight, clamped to `[0.5, 5.0]` at ingestion.
    pub reliability: f64,
    /// The raw verdict label as written in the dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceEntry {
    /// Key used to collapse repeated citations of the same source within a food.
    pub fn dedup_key(&self) -> String {
        match self.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.source_name.trim().to_string(),
        }
    }
}

/// All deduplicated opinions about one food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSummary {
    pub name: String,
    /// Sorted by reliability, highest first.
    pub entries: Vec<SourceEntry>,
}

impl FoodSummary {
    pub fn new(name: impl Into<String>, entries: Vec<SourceEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Reliability-weighted mean of verdict scores in `[0, 3]`; 0 when no
    /// entry carries weight.
    pub fn weighted_score(&self) -> f64 {
        let (num, denom) = self
            .entries
            .iter()
            .filter(|e| e.reliability > 0.0)
            .fold((0.0, 0.0), |(num, denom), e| {
                (num + e.verdict.score() * e.reliability, denom + e.reliability)
            });
        if denom <= 0.0 {
            return 0.0;
        }
        num / denom
    }

    /// [`weighted_score`](Self::weighted_score) rounded half-to-even.
    pub fn score_rounded(&self) -> i64 {
        self.weighted_score().round_ties_even() as i64
    }

    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }
}
