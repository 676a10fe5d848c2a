//! Context assembly for the chat system prompt.
//!
//! Re-segments and re-indexes the blob from scratch on every call, ranks
//! against the user's message, and joins the winners. No caching: if the
//! blob changed since the last request, this call sees the new text.

use crate::index::LexicalIndex;
use crate::search::search;
use crate::segment::{DEFAULT_MAX_CHUNK_CHARS, segment_text};

/// How many ranked segments go into the chat context.
pub const CONTEXT_SEGMENTS: usize = 3;
/// How many leading segments to fall back to when nothing matches.
pub const FALLBACK_SEGMENTS: usize = 2;
/// Stands in for the context when no master data exists yet.
pub const NO_DATA_PLACEHOLDER: &str = "No master data has been stored yet.";

/// Build the context string injected into the outbound chat request.
///
/// Empty source text short-circuits to [`NO_DATA_PLACEHOLDER`] without
/// segmenting. An unmatched query falls back to the first
/// [`FALLBACK_SEGMENTS`] segments in original order. Selected segment
/// contents are joined with a blank line.
pub fn build_context(text: &str, query: &str) -> String {
    if text.trim().is_empty() {
        return NO_DATA_PLACEHOLDER.to_string();
    }

    let segments = segment_text(text, DEFAULT_MAX_CHUNK_CHARS);
    let index = LexicalIndex::build(&segments);
    let ranked = search(query, &segments, &index, CONTEXT_SEGMENTS);

    let selected: Vec<&str> = if ranked.is_empty() {
        segments
            .iter()
            .take(FALLBACK_SEGMENTS)
            .map(|s| s.content.as_str())
            .collect()
    } else {
        ranked.iter().map(|r| r.segment.content.as_str()).collect()
    };

    selected.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Four sentences long enough that each becomes its own segment at the
    // default cap.
    fn four_topic_text() -> String {
        let pad = "filler ".repeat(60);
        format!(
            "Inventory report section alpha {pad}. Inventory report section beta {pad}. \
             Inventory report section gamma {pad}. Inventory report section delta {pad}."
        )
    }

    #[test]
    fn test_empty_text_uses_placeholder() {
        assert_eq!(build_context("", "sales"), NO_DATA_PLACEHOLDER);
        assert_eq!(build_context("   \n ", "sales"), NO_DATA_PLACEHOLDER);
    }

    #[test]
    fn test_top_three_matching_segments_joined() {
        let text = four_topic_text();
        let context = build_context(&text, "inventory");

        let parts: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(parts.len(), CONTEXT_SEGMENTS);
        assert!(parts[0].contains("section alpha"));
        assert!(parts[1].contains("section beta"));
        assert!(parts[2].contains("section gamma"));
        assert!(!context.contains("section delta"));
    }

    #[test]
    fn test_unmatched_query_falls_back_to_first_two() {
        let text = four_topic_text();
        let context = build_context(&text, "zeppelin");

        let parts: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(parts.len(), FALLBACK_SEGMENTS);
        assert!(parts[0].contains("section alpha"));
        assert!(parts[1].contains("section beta"));
    }

    #[test]
    fn test_empty_query_falls_back_to_first_two() {
        let text = four_topic_text();
        let context = build_context(&text, "");

        let parts: Vec<&str> = context.split("\n\n").collect();
        assert_eq!(parts.len(), FALLBACK_SEGMENTS);
    }

    #[test]
    fn test_single_strong_match_stands_alone() {
        let text = "Sales grew in march. Warehouse relocated to osaka. Fleet expanded slightly.";
        let context = build_context(text, "warehouse osaka");
        assert_eq!(context, "Sales grew in march. Warehouse relocated to osaka. Fleet expanded slightly.");
    }

    #[test]
    fn test_short_text_fallback_is_whole_text() {
        let context = build_context("Only one fact here.", "unrelated");
        assert_eq!(context, "Only one fact here.");
    }
}
