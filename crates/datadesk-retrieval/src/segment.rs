//! Sentence-aggregating text segmenter.
//!
//! Splits the blob on sentence terminators (`.`, `!`, `?`) and greedily
//! packs consecutive sentences into segments that stay at or under a
//! character cap. The cap is advisory: a single over-long sentence still
//! becomes (or starts) one segment untruncated; there is no hard split.

use serde::Serialize;
use uuid::Uuid;

/// Advisory per-segment character cap.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 500;

/// A bounded unit of retrievable text.
///
/// Immutable after creation; a new segmentation run replaces all segments.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    /// Opaque unique id, minted at segmentation time.
    pub id: String,
    /// Segment text, always closed with a trailing `.`.
    pub content: String,
    /// Ordinal position within one segmentation run, contiguous from 0.
    pub chunk_index: usize,
    pub word_count: usize,
    pub char_count: usize,
}

impl Segment {
    /// Build a segment and compute its metrics once.
    ///
    /// Counts are in characters and whitespace-separated words, not bytes.
    pub fn new(content: impl Into<String>, chunk_index: usize) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        let char_count = content.chars().count();
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            chunk_index,
            word_count,
            char_count,
        }
    }
}

/// Split `text` into segments of sentences joined by `". "`.
///
/// Sentences accumulate into a buffer while the joined length stays at or
/// under `max_chunk_chars` (measured in characters); the sentence that would
/// push it over closes the buffer as a segment (with a trailing `.`) and
/// starts the next one. Empty or whitespace-only input yields an empty vec,
/// never an error.
pub fn segment_text(text: &str, max_chunk_chars: usize) -> Vec<Segment> {
    let sentences = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut segments: Vec<Segment> = Vec::new();
    let mut buf = String::new();

    for sentence in sentences {
        if buf.is_empty() {
            // First sentence always starts the buffer, even when over the cap.
            buf.push_str(sentence);
            continue;
        }
        let joined_chars = buf.chars().count() + 2 + sentence.chars().count();
        if joined_chars <= max_chunk_chars {
            buf.push_str(". ");
            buf.push_str(sentence);
        } else {
            close_segment(&mut segments, &mut buf);
            buf.push_str(sentence);
        }
    }
    close_segment(&mut segments, &mut buf);

    segments
}

/// Flush a non-empty buffer as the next segment, appending the closing `.`.
fn close_segment(segments: &mut Vec<Segment>, buf: &mut String) {
    if buf.is_empty() {
        return;
    }
    buf.push('.');
    let content = std::mem::take(buf);
    let chunk_index = segments.len();
    segments.push(Segment::new(content, chunk_index));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_segment() {
        let segments = segment_text(
            "Sales grew 5%. Inventory dropped. Shipments increased.",
            DEFAULT_MAX_CHUNK_CHARS,
        );
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].content,
            "Sales grew 5%. Inventory dropped. Shipments increased."
        );
        assert_eq!(segments[0].chunk_index, 0);
    }

    #[test]
    fn test_small_cap_splits_per_sentence() {
        let segments = segment_text("This is sentence one. This is sentence two.", 20);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content, "This is sentence one.");
        assert_eq!(segments[1].content, "This is sentence two.");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(segment_text("", DEFAULT_MAX_CHUNK_CHARS).is_empty());
        assert!(segment_text("   \n\t  ", DEFAULT_MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn test_exclamation_and_question_terminators() {
        let segments = segment_text("Stop! Why? Go.", DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "Stop. Why. Go.");
    }

    #[test]
    fn test_cap_boundary_is_inclusive() {
        // "abcde" + ". " + "abc" is exactly 10 chars.
        let fits = segment_text("abcde. abc.", 10);
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0].content, "abcde. abc.");

        let splits = segment_text("abcde. abc.", 9);
        assert_eq!(splits.len(), 2);
    }

    #[test]
    fn test_oversized_sentence_kept_untruncated() {
        let long = "x".repeat(600);
        let segments = segment_text(&long, DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].char_count, 601); // sentence + closing period
    }

    #[test]
    fn test_chunk_indices_contiguous() {
        let text = (0..30)
            .map(|i| format!("Sentence number {i} right here."))
            .collect::<Vec<_>>()
            .join(" ");
        let segments = segment_text(&text, 40);
        assert!(segments.len() > 1);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.chunk_index, i);
        }
    }

    #[test]
    fn test_segments_reconstruct_sentences() {
        let text = "Alpha one two. Beta three four! Gamma five six? Delta seven.";
        let original: Vec<&str> = text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        // Cap chosen so segments hold more than one sentence each.
        let segments = segment_text(text, 31);
        assert!(segments.len() > 1);
        let recovered: Vec<String> = segments
            .iter()
            .flat_map(|s| {
                s.content
                    .strip_suffix('.')
                    .unwrap_or(&s.content)
                    .split(". ")
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .collect();

        assert_eq!(recovered, original);
    }

    #[test]
    fn test_word_and_char_metrics() {
        let segments = segment_text("Alpha beta gamma.", DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(segments[0].word_count, 3);
        assert_eq!(segments[0].char_count, 17);
    }

    #[test]
    fn test_char_count_is_characters_not_bytes() {
        let segments = segment_text("Café menü test.", DEFAULT_MAX_CHUNK_CHARS);
        assert_eq!(segments[0].char_count, 15);
        assert!(segments[0].content.len() > 15); // bytes exceed chars here
    }

    #[test]
    fn test_ids_are_unique() {
        let segments = segment_text("One fine line. Two fine lines. Three fine lines.", 16);
        assert_eq!(segments.len(), 3);
        assert_ne!(segments[0].id, segments[1].id);
        assert_ne!(segments[1].id, segments[2].id);
    }
}
