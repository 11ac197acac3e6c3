//! Hybrid ranking primitives: result types, fusion weights, and combination.
//!
//! This module provides the building blocks for merging externally supplied
//! vector similarity scores with BM25 keyword scores into one ranked,
//! deduplicated result list.

/// Hybrid fusion: score normalization and weighted combination.
pub mod hybrid;
/// Hybrid result types and the vector-item text abstraction.
pub mod types;
/// Fusion weight selection heuristics.
pub mod weights;

pub use hybrid::combine_results;
pub use types::{HybridResult, VectorHit, VectorItem};
pub use weights::{select_weights, FusionWeights};
