//! Relevance ranking over indexed segments.
//!
//! Two additive scoring passes, kept exactly as shipped:
//! 1. token overlap: +1.0 per posting-list occurrence for each query token
//! 2. substring containment: +0.5 per (segment, query token) pair where the
//!    lowercased segment content contains the token
//!
//! A token that is both indexed and substring-matched therefore contributes
//! 1.5, and repeated query tokens stack. Equal scores order by ascending
//! `chunk_index`.

use std::collections::HashMap;

use crate::index::{LexicalIndex, normalize};
use crate::segment::Segment;

/// Default result cap for direct search.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// One ranked hit.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub segment: Segment,
    pub score: f64,
}

/// Score and rank segments against a query.
///
/// Empty query, empty segment list, or no match all return an empty vec.
/// Results are sorted by descending score and truncated to `max_results`;
/// candidates are gathered in `chunk_index` order and the sort is stable,
/// so ties resolve to ascending `chunk_index`.
pub fn search(
    query: &str,
    segments: &[Segment],
    index: &LexicalIndex,
    max_results: usize,
) -> Vec<SearchResult> {
    if segments.is_empty() {
        return Vec::new();
    }
    let query_tokens = normalize(query);
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let mut scores: HashMap<&str, f64> = HashMap::new();

    // Pass 1: token overlap. Repeated query tokens each run their own pass.
    for token in &query_tokens {
        if let Some(ids) = index.postings(token) {
            for id in ids {
                *scores.entry(id.as_str()).or_insert(0.0) += 1.0;
            }
        }
    }

    // Pass 2: substring containment, checked against every segment.
    for segment in segments {
        let lowered = segment.content.to_lowercase();
        for token in &query_tokens {
            if lowered.contains(token.as_str()) {
                *scores.entry(segment.id.as_str()).or_insert(0.0) += 0.5;
            }
        }
    }

    let mut results: Vec<SearchResult> = segments
        .iter()
        .filter_map(|segment| {
            let score = scores.get(segment.id.as_str()).copied().unwrap_or(0.0);
            (score > 0.0).then(|| SearchResult {
                segment: segment.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(max_results);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(contents: &[&str]) -> Vec<Segment> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| Segment::new(*c, i))
            .collect()
    }

    fn ranked(query: &str, contents: &[&str]) -> Vec<SearchResult> {
        let segs = segments(contents);
        let index = LexicalIndex::build(&segs);
        search(query, &segs, &index, DEFAULT_MAX_RESULTS)
    }

    #[test]
    fn test_equal_scores_tie_break_by_chunk_index() {
        let results = ranked("recipe", &["apple pie recipe.", "banana bread recipe."]);

        assert_eq!(results.len(), 2);
        // One posting hit (+1.0) and one substring hit (+0.5) each.
        assert!((results[0].score - 1.5).abs() < f64::EPSILON);
        assert!((results[1].score - 1.5).abs() < f64::EPSILON);
        assert_eq!(results[0].segment.chunk_index, 0);
        assert_eq!(results[1].segment.chunk_index, 1);
    }

    #[test]
    fn test_posting_and_substring_hits_both_count() {
        // The same token scores through both passes. Pinned on purpose:
        // 1.0 (posting) + 0.5 (substring) = 1.5.
        let results = ranked("recipe", &["apple pie recipe."]);
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeated_query_tokens_stack() {
        let results = ranked("recipe recipe", &["apple pie recipe."]);
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unique_token_single_top_result() {
        let results = ranked(
            "engine",
            &[
                "apple pie recipe.",
                "car engine manual.",
                "banana bread recipe.",
            ],
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].segment.chunk_index, 1);
        assert!((results[0].score - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_substring_only_match_scores_half() {
        // "phone" is never a token of the segment, but is contained in
        // "smartphones", so only the substring pass fires.
        let results = ranked("phone", &["smartphones sold out."]);
        assert_eq!(results.len(), 1);
        assert!((results[0].score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_more_matching_tokens_rank_higher() {
        let results = ranked(
            "shipping costs",
            &["shipping delayed again.", "shipping costs rose."],
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].segment.chunk_index, 1);
        assert!((results[0].score - 3.0).abs() < f64::EPSILON);
        assert!((results[1].score - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmatched_query_returns_empty() {
        assert!(ranked("zeppelin", &["apple pie recipe."]).is_empty());
    }

    #[test]
    fn test_empty_query_returns_empty() {
        assert!(ranked("", &["apple pie recipe."]).is_empty());
        // Tokens of length <= 2 normalize away entirely.
        assert!(ranked("a an it", &["apple pie recipe."]).is_empty());
    }

    #[test]
    fn test_empty_segments_return_empty() {
        let index = LexicalIndex::build(&[]);
        assert!(search("recipe", &[], &index, DEFAULT_MAX_RESULTS).is_empty());
    }

    #[test]
    fn test_max_results_truncates_in_order() {
        let segs = segments(&[
            "data point alpha.",
            "data point beta.",
            "data point gamma.",
            "data point delta.",
        ]);
        let index = LexicalIndex::build(&segs);
        let results = search("data", &segs, &index, 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].segment.chunk_index, 0);
        assert_eq!(results[1].segment.chunk_index, 1);
    }
}
