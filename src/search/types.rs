//! Hybrid result types and the vector-item text abstraction.

use crate::document::Document;
use serde_json::Value;
use std::collections::HashMap;

/// A document with its fused hybrid score and the normalized per-source scores.
///
/// Returned by [`combine_results`](crate::search::combine_results) sorted by
/// descending fused score. At least one of `vector_score` and `keyword_score`
/// is nonzero in every returned result.
#[derive(Debug, Clone)]
pub struct HybridResult {
    /// The matched document.
    pub document: Document,
    /// Weighted combination of `vector_score` and `keyword_score`.
    pub score: f64,
    /// Normalized vector similarity in `[0, 1]` (0 when absent).
    pub vector_score: f64,
    /// Normalized BM25 score in `[0, 1]` (0 when absent).
    pub keyword_score: f64,
    /// Copy of the document's metadata.
    pub metadata: HashMap<String, Value>,
}

/// One result from an external vector similarity search.
#[derive(Debug, Clone)]
pub struct VectorHit<T> {
    /// The item returned by the vector index.
    pub item: T,
    /// Raw similarity score (higher = more similar).
    pub score: f64,
}

/// Text access for items returned by an external vector index.
///
/// Fusion joins vector hits with candidate documents by exact text equality,
/// so every hit must expose the text it was indexed under. Returning `None`
/// marks the hit as unusable; it is skipped with a warning instead of
/// aborting the search.
pub trait VectorItem {
    /// The text content of this item, if available.
    fn text(&self) -> Option<&str>;
}

impl VectorItem for Document {
    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }
}

impl VectorItem for String {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl VectorItem for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: VectorItem + ?Sized> VectorItem for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}
