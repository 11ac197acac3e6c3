//! BM25 keyword search over per-query candidate sets.
//!
//! Implements Okapi BM25 scoring with all term statistics computed per call
//! over the supplied candidates. Documents are tokenized using a whitespace
//! tokenizer with Hangul support and Korean/English stop word removal. No
//! stemming is applied, and no index persists between calls.

/// BM25 Okapi scoring and candidate ranking.
pub mod scorer;
/// Whitespace tokenizer with Hangul support and stop word filtering.
pub mod tokenizer;

pub use scorer::{bm25_search, ScoredResult};
pub use tokenizer::{tokenize, Tokens};
