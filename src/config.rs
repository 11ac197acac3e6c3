//! Tuning constants for the ranking engine.
//!
//! All scoring parameters and defaults are compile-time constants. The engine
//! has no runtime configuration surface; callers override behavior per call
//! (result count, fusion weights) through function arguments.

/// BM25 Okapi term frequency saturation parameter.
///
/// Controls how quickly repeated occurrences of a term stop adding relevance.
/// Higher values let term frequency keep growing. Typical range: 1.0–2.0.
pub const BM25_K1: f64 = 1.5;

/// BM25 Okapi document length normalization parameter.
///
/// Controls the impact of document length on scoring. 0.0 = no normalization,
/// 1.0 = full normalization. Standard value is 0.75.
pub const BM25_B: f64 = 0.75;

/// Default number of results (`top_k`) per search.
pub const DEFAULT_TOP_K: usize = 5;

/// Default weight applied to the normalized vector similarity score.
///
/// Used when the caller supplies no explicit weights and no adaptive
/// weight-selection rule matches the query.
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.6;

/// Default weight applied to the normalized BM25 keyword score.
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.4;
