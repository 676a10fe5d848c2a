//! # DataDesk Retrieval
//!
//! Keyword RAG core over the master-data blob. No vector DB, no embeddings,
//! no persistence: every call rebuilds everything from the text snapshot it
//! is handed.
//!
//! ## Design
//! - **Sentence-aggregated segments**: ~500 char chunks, advisory cap
//! - **Inverted index**: normalized token → posting list of segment ids
//! - **Two-signal scoring**: token overlap (+1) and substring containment (+0.5)
//! - **Full rebuild per call**: pure functions, zero cross-request state
//!
//! ## How it works
//! ```text
//! Master data text snapshot
//!   ↓
//! segment_text()        → bounded Segments (chunk_index 0..n)
//!   ↓
//! LexicalIndex::build() → token → [segment ids]
//!   ↓
//! search(query)         → scored, ranked, truncated results
//!   ↓
//! build_context()       → top 3 joined for the chat system prompt
//! ```
//!
//! Because nothing is cached, concurrent callers never contend: each request
//! gets its own segment list and index derived from its own snapshot of the
//! blob.

pub mod context;
pub mod index;
pub mod search;
pub mod segment;

pub use context::{CONTEXT_SEGMENTS, FALLBACK_SEGMENTS, NO_DATA_PLACEHOLDER, build_context};
pub use index::{LexicalIndex, normalize};
pub use search::{DEFAULT_MAX_RESULTS, SearchResult, search};
pub use segment::{DEFAULT_MAX_CHUNK_CHARS, Segment, segment_text};
