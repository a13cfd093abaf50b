// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reliability-aware digest of a food's source entries.
//!
//! Entries are split into reliability tiers; the most reliable non-empty tier
//! decides the headline and the remaining tiers can add a dissent sentence.

use serde::Serialize;

use crate::dataset::{SourceEntry, Verdict};

/// Signal thresholds, in percent.
const SIGNAL_THRESHOLD: f64 = 40.0;
/// Dissent in other tiers is notable at this count or share.
const NOTABLE_COUNT: usize = 2;
const NOTABLE_PCT: f64 = 30.0;

/// Reliability tier, most reliable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Mid,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Mid, Tier::Low];

    pub fn of(reliability: f64) -> Self {
        if reliability >= 3.0 {
            Tier::High
        } else if reliability >= 2.0 {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    fn lead(self) -> &'static str {
        match self {
            Tier::High => "According to high-reliability sources,",
            Tier::Mid => "According to mid-reliability sources,",
            Tier::Low => "According to lower-reliability sources,",
        }
    }
}

/// Per-verdict counts over some set of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerdictCounts {
    pub safe: usize,
    pub conditional: usize,
    pub caution: usize,
    pub avoid: usize,
}

impl VerdictCounts {
    pub fn tally<'a>(entries: impl IntoIterator<Item = &'a SourceEntry>) -> Self {
        entries.into_iter().fold(Self::default(), |mut counts, e| {
            counts.add(e.verdict);
            counts
        })
    }

    fn add(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Safe => self.safe += 1,
            Verdict::Conditional => self.conditional += 1,
            Verdict::Caution => self.caution += 1,
            Verdict::Avoid => self.avoid += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.conditional + self.caution + self.avoid
    }

    /// Share of `n` in percent; 0 when empty.
    pub fn pct(&self, n: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => n as f64 * 100.0 / total as f64,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            safe: self.safe + other.safe,
            conditional: self.conditional + other.conditional,
            caution: self.caution + other.caution,
            avoid: self.avoid + other.avoid,
        }
    }
}

/// Which opinion dominates a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dominance {
    Safe,
    Conditional,
    Caution,
    Ban,
    Mixed,
}

impl Dominance {
    pub fn of(counts: &VerdictCounts) -> Self {
        if counts.total() == 0 {
            return Dominance::Mixed;
        }
        let safe = counts.pct(counts.safe);
        let conditional = counts.pct(counts.conditional);
        let caution = counts.pct(counts.caution);
        let avoid = counts.pct(counts.avoid);

        if avoid >= 50.0 {
            Dominance::Ban
        } else if caution >= 40.0 || (avoid >= 30.0 && caution + avoid >= 50.0) {
            Dominance::Caution
        } else if conditional >= 40.0 {
            Dominance::Conditional
        } else if safe >= 60.0 {
            Dominance::Safe
        } else {
            Dominance::Mixed
        }
    }

    fn headline(self) -> &'static str {
        match self {
            Dominance::Safe => "most opinions say it's generally okay.",
            Dominance::Conditional => "many say it's okay if you're careful.",
            Dominance::Caution => "caution is the dominant opinion.",
            Dominance::Ban => "avoiding it is the dominant opinion.",
            Dominance::Mixed => "opinions are mixed.",
        }
    }
}

/// Build the one- or two-sentence digest. Empty input yields an empty string.
pub fn reliability_aware_summary(entries: &[SourceEntry]) -> String {
    let by_tier = Tier::ALL.map(|tier| {
        VerdictCounts::tally(entries.iter().filter(|e| Tier::of(e.reliability) == tier))
    });
    let Some(primary) = (0..by_tier.len()).find(|&i| by_tier[i].total() > 0) else {
        return String::new();
    };

    let counts = by_tier[primary];
    let dominance = Dominance::of(&counts);
    let head = format!("{} {}", Tier::ALL[primary].lead(), dominance.headline());

    let others = by_tier
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != primary)
        .fold(VerdictCounts::default(), |acc, (_, c)| acc.merge(*c));
    let other_total = others.total().max(1);
    let notable =
        |n: usize| n >= NOTABLE_COUNT || n as f64 * 100.0 / other_total as f64 >= NOTABLE_PCT;

    let tail = match dominance {
        Dominance::Ban if notable(others.safe) || notable(others.conditional) => {
            " Still, some other sources say it's conditional/okay."
        }
        Dominance::Caution if notable(others.safe) => " Still, some sources say it's okay.",
        Dominance::Caution if notable(others.conditional) => {
            " Still, some sources say it's okay with conditions."
        }
        Dominance::Conditional if notable(others.caution) || notable(others.avoid) => {
            " Still, some sources warn caution is needed."
        }
        Dominance::Conditional if notable(others.safe) => " Also, some sources say it's okay.",
        Dominance::Safe if notable(others.avoid) || notable(others.caution) => {
            " Still, some sources recommend caution/avoidance."
        }
        Dominance::Safe if notable(others.conditional) => {
            " Still, some sources consider it conditional."
        }
        _ => "",
    };

    head + tail
}

/// Four-level recommendation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Avoid,
    Caution,
    CareNeeded,
    Okay,
}

impl Signal {
    /// Decide from verdict shares; 40% thresholds checked from most severe.
    pub fn decide(counts: &VerdictCounts) -> Self {
        if counts.pct(counts.avoid) >= SIGNAL_THRESHOLD {
            Signal::Avoid
        } else if counts.pct(counts.caution) >= SIGNAL_THRESHOLD {
            Signal::Caution
        } else if counts.pct(counts.conditional) >= SIGNAL_THRESHOLD {
            Signal::CareNeeded
        } else {
            Signal::Okay
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Signal::Avoid => "Better to avoid",
            Signal::Caution => "Use caution",
            Signal::CareNeeded => "Likely okay with care",
            Signal::Okay => "Generally okay",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Signal::Avoid => "✖",
            Signal::Caution => "⚠",
            Signal::CareNeeded => "●",
            Signal::Okay => "♥",
        }
    }
}

/// One cell of the tri-group row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSignal {
    pub tier: Tier,
    pub title: &'static str,
    pub counts: VerdictCounts,
    /// `None` when the group holds no entries.
    pub signal: Option<Signal>,
}

/// Signal per reliability group. Unlike [`Tier::of`], the Low group only
/// takes entries in `1.0..2.0`; anything below 1.0 lands in no group.
pub fn tri_group_signals(entries: &[SourceEntry]) -> [GroupSignal; 3] {
    Tier::ALL.map(|tier| {
        let counts = VerdictCounts::tally(entries.iter().filter(|e| match tier {
            Tier::High => e.reliability >= 3.0,
            Tier::Mid => (2.0..3.0).contains(&e.reliability),
            Tier::Low => (1.0..2.0).contains(&e.reliability),
        }));
        let title = match tier {
            Tier::High => "Clinicians / Institutions",
            Tier::Mid => "Companies / Press releases",
            Tier::Low => "Individuals / Communities",
        };
        GroupSignal {
            tier,
            title,
            counts,
            signal: (counts.total() > 0).then(|| Signal::decide(&counts)),
        }
    })
}

/// Source-list tab: everything, or one verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum VerdictTab {
    #[default]
    All,
    Only(Verdict),
}

impl VerdictTab {
    /// Parse `all` or a verdict label.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Some(VerdictTab::All);
        }
        Verdict::from_label(raw).map(VerdictTab::Only)
    }

    pub fn admits(self, verdict: Verdict) -> bool {
        match self {
            VerdictTab::All => true,
            VerdictTab::Only(v) => v == verdict,
        }
    }
}

/// Entries ordered by severity (Avoid first), then reliability, filtered by
/// `tab`.
pub fn source_listing(entries: &[SourceEntry], tab: VerdictTab) -> Vec<&SourceEntry> {
    let mut listed: Vec<&SourceEntry> = entries.iter().filter(|e| tab.admits(e.verdict)).collect();
    listed.sort_by(|a, b| {
        b.verdict
            .severity()
            .cmp(&a.verdict.severity())
            .then_with(|| b.reliability.total_cmp(&a.reliability))
    });
    listed
}

/// Everything a result card shows about one food.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Digest {
    pub summary: String,
    pub signal: Option<Signal>,
    pub counts: VerdictCounts,
    pub groups: [GroupSignal; 3],
}

impl Digest {
    pub fn of(entries: &[SourceEntry]) -> Self {
        let counts = VerdictCounts::tally(entries);
        Self {
            summary: reliability_aware_summary(entries),
            signal: (counts.total() > 0).then(|| Signal::decide(&counts)),
            counts,
            groups: tri_group_signals(entries),
        }
    }
}
