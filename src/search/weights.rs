//! Fusion weight selection for hybrid ranking.
//!
//! Weights control the linear combination of normalized vector and keyword
//! scores. Callers either pass explicit weights or let [`select_weights`]
//! pick a pair from simple query-shape heuristics.

use crate::config;
use serde::{Deserialize, Serialize};

/// Relative weights for the two score sources in hybrid ranking.
///
/// Applied as-is: the pair is not required to sum to 1, and a pair summing
/// above 1 scales fused scores up proportionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    /// Multiplier for the normalized vector similarity score.
    pub vector: f64,
    /// Multiplier for the normalized BM25 keyword score.
    pub keyword: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            vector: config::DEFAULT_VECTOR_WEIGHT,
            keyword: config::DEFAULT_KEYWORD_WEIGHT,
        }
    }
}

/// Picks fusion weights from the query text. The first matching rule wins:
/// quoted text favors keyword match, digits split the weights evenly,
/// question-style queries favor semantic similarity.
pub fn select_weights(query: &str) -> FusionWeights {
    let lower = query.to_lowercase();

    // Quoted text: exact-match intent
    if lower.contains('"') || lower.contains('\'') {
        return FusionWeights {
            vector: 0.3,
            keyword: 0.7,
        };
    }
    // Digits: dates, versions, quantities
    if query.chars().any(|c| c.is_ascii_digit()) {
        return FusionWeights {
            vector: 0.5,
            keyword: 0.5,
        };
    }
    // Question-style query, Korean or English. Substring containment, not
    // word-boundary matching.
    const INTERROGATIVES: [&str; 6] = ["무엇", "어떻게", "왜", "what", "how", "why"];
    if INTERROGATIVES.iter().any(|marker| lower.contains(marker)) {
        return FusionWeights {
            vector: 0.7,
            keyword: 0.3,
        };
    }
    FusionWeights::default()
}
