//! Inverted lexical index over segments.
//!
//! Token normalization is shared between index build and query handling so
//! the two sides can never disagree on what a token is.

use std::collections::HashMap;

use crate::segment::Segment;

/// Normalize text into search tokens.
///
/// Lowercases, turns every character that is neither alphanumeric nor `_`
/// into a space, splits on whitespace runs, and keeps tokens longer than
/// 2 characters.
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > 2)
        .map(String::from)
        .collect()
}

/// Token → posting list of segment ids, in segment (`chunk_index`) order.
///
/// Rebuilt from scratch on every call; there is no merge and no persistence.
/// A segment id appears at most once per token, however often the token
/// repeats inside that segment.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    postings: HashMap<String, Vec<String>>,
}

impl LexicalIndex {
    /// Build a fresh index from a segment sequence.
    pub fn build(segments: &[Segment]) -> Self {
        let mut postings: HashMap<String, Vec<String>> = HashMap::new();
        for segment in segments {
            for token in normalize(&segment.content) {
                let list = postings.entry(token).or_default();
                if !list.iter().any(|id| id == &segment.id) {
                    list.push(segment.id.clone());
                }
            }
        }
        Self { postings }
    }

    /// Posting list for a token, if any segment contains it.
    pub fn postings(&self, token: &str) -> Option<&[String]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
