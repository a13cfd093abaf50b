// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filter + sort pipeline: (query, dataset, synonyms, index) → ordered results.

use serde::Serialize;
use tracing::debug;

use super::index::TokenIndex;
use super::rank::{RankContext, RankKey};
use crate::dataset::{FoodSummary, SynonymTable};
use crate::text::normalize;

/// A candidate together with the key it was ranked by.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedFood<'a> {
    pub summary: &'a FoodSummary,
    pub key: RankKey,
}

/// Ordered results for one query.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome<'a> {
    /// Ranked candidates that carry at least one source entry.
    pub results: Vec<RankedFood<'a>>,
    /// The top result's normalized name equals or starts with the normalized
    /// query.
    pub strong_match: bool,
    /// Ordered hints extracted from the query.
    pub hints: Vec<String>,
    /// Expanded query variants.
    pub expanded: Vec<String>,
}

impl<'a> SearchOutcome<'a> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn top(&self) -> Option<&RankedFood<'a>> {
        self.results.first()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &'a FoodSummary> + '_ {
        self.results.iter().map(|r| r.summary)
    }
}

/// Filter and order every candidate, including summaries without entries.
pub fn rank_candidates<'a>(
    query: &str,
    summaries: &'a [FoodSummary],
    synonyms: &SynonymTable,
    index: &TokenIndex,
) -> (RankContext, Vec<RankedFood<'a>>) {
    let ctx = RankContext::new(query, synonyms, index);
    if query.trim().is_empty() {
        return (ctx, Vec::new());
    }

    let mut ranked: Vec<RankedFood<'a>> = summaries
        .iter()
        .filter(|s| ctx.admits(&normalize(&s.name)))
        .map(|summary| RankedFood {
            summary,
            key: ctx.rank_key(summary),
        })
        .collect();
    ranked.sort_by(|a, b| a.key.cmp_rank(&b.key));

    debug!(
        query = %query.trim(),
        hints = ctx.hints.len(),
        variants = ctx.expanded.len(),
        candidates = ranked.len(),
        "Ranked candidates"
    );
    (ctx, ranked)
}

/// `true` iff `top`'s normalized name equals or starts with the normalized
/// query.
pub fn is_strong_match(top: &FoodSummary, query: &str) -> bool {
    let name = normalize(&top.name);
    let query = normalize(query);
    name == query || name.starts_with(&query)
}

/// Run the full pipeline. A blank query yields an empty outcome.
pub fn search<'a>(
    query: &str,
    summaries: &'a [FoodSummary],
    synonyms: &SynonymTable,
    index: &TokenIndex,
) -> SearchOutcome<'a> {
    if query.trim().is_empty() {
        return SearchOutcome::default();
    }

    let (ctx, ranked) = rank_candidates(query, summaries, synonyms, index);
    let results: Vec<RankedFood<'a>> = ranked
        .into_iter()
        .filter(|r| r.summary.has_entries())
        .collect();
    let strong_match = results
        .first()
        .is_some_and(|top| is_strong_match(top.summary, query));

    SearchOutcome {
        results,
        strong_match,
        hints: ctx.hints,
        expanded: ctx.expanded,
    }
}

/// Offer the fallback advisory when the query is non-blank and the results
/// lack a strong match.
pub fn should_offer_advisory(query: &str, outcome: &SearchOutcome<'_>) -> bool {
    !query.trim().is_empty() && (!outcome.strong_match || outcome.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{SourceEntry, Verdict};
    use crate::search::rank::Bucket;

    fn food(name: &str, verdict: Verdict, reliability: f64) -> FoodSummary {
        FoodSummary::new(
            name,
            vec![SourceEntry {
                source_name: format!("{name}-src"),
                verdict,
                reliability,
                note: None,
                url: None,
            }],
        )
    }

    fn run<'a>(query: &str, foods: &'a [FoodSummary], synonyms: &SynonymTable) -> SearchOutcome<'a> {
        let index = TokenIndex::build(foods);
        search(query, foods, synonyms, &index)
    }

    fn names(outcome: &SearchOutcome<'_>) -> Vec<String> {
        outcome.summaries().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn exact_match_ranks_first() {
        let foods = vec![
            food("커피우유", Verdict::Safe, 5.0),
            food("커피", Verdict::Avoid, 0.5),
        ];
        let outcome = run("커피", &foods, &SynonymTable::new());
        assert_eq!(names(&outcome), vec!["커피", "커피우유"]);
        assert_eq!(outcome.results[0].key.bucket, Bucket::Exact);
        assert!(outcome.results[1].key.bucket > Bucket::Exact);
        assert!(outcome.strong_match);
    }

    #[test]
    fn blank_query_returns_nothing() {
        let foods = vec![food("커피", Verdict::Safe, 1.0)];
        let outcome = run("  ", &foods, &SynonymTable::new());
        assert!(outcome.is_empty());
        assert!(!outcome.strong_match);
        assert!(!should_offer_advisory("  ", &outcome));
    }

    #[test]
    fn free_text_query_finds_embedded_food() {
        let foods = vec![
            food("팥", Verdict::Safe, 1.0),
            food("팥빙수", Verdict::Conditional, 2.0),
            food("녹차", Verdict::Safe, 1.0),
        ];
        let outcome = run("임신 중에 팥빙수 먹어도 돼요?", &foods, &SynonymTable::new());
        assert_eq!(names(&outcome)[0], "팥빙수");
        assert!(!names(&outcome).contains(&"녹차".to_string()));
        assert!(!outcome.strong_match);
        assert!(should_offer_advisory("임신 중에 팥빙수 먹어도 돼요?", &outcome));
    }

    #[test]
    fn synonyms_widen_the_candidate_set() {
        let foods = vec![food("아이스 아메리카노", Verdict::Caution, 2.0)];
        let synonyms: SynonymTable = [("아아", vec!["아메리카노"])].into_iter().collect();
        let outcome = run("아아", &foods, &synonyms);
        assert_eq!(names(&outcome), vec!["아이스 아메리카노"]);
        assert_eq!(outcome.results[0].key.bucket, Bucket::SynonymBoundary);
        assert_eq!(outcome.expanded, vec!["아아", "아메리카노"]);
    }

    #[test]
    fn summaries_without_entries_are_hidden() {
        let foods = vec![FoodSummary::new("커피", vec![]), food("커피우유", Verdict::Safe, 1.0)];
        let index = TokenIndex::build(&foods);
        let (_, all) = rank_candidates("커피", &foods, &SynonymTable::new(), &index);
        assert_eq!(all.len(), 2);

        let outcome = search("커피", &foods, &SynonymTable::new(), &index);
        assert_eq!(names(&outcome), vec!["커피우유"]);
        assert!(outcome.strong_match);
    }

    #[test]
    fn no_match_is_empty_and_offers_advisory() {
        let foods = vec![food("커피", Verdict::Safe, 1.0)];
        let outcome = run("김치", &foods, &SynonymTable::new());
        assert!(outcome.is_empty());
        assert!(should_offer_advisory("김치", &outcome));
    }

    #[test]
    fn more_reliable_verdict_breaks_equal_scores() {
        let foods = vec![
            food("커피 A", Verdict::Avoid, 1.0),
            food("커피 B", Verdict::Safe, 1.0),
        ];
        let outcome = run("커피", &foods, &SynonymTable::new());
        // identical structure; dataset score (3 vs 0) decides through relevance
        assert_eq!(names(&outcome), vec!["커피 B", "커피 A"]);
    }
}
