//! # hybrid-rank
//!
//! A hybrid lexical/semantic ranking engine: Okapi BM25 keyword scoring over
//! a per-query candidate set, fused with externally computed vector
//! similarity scores into a single ranked result list.
//!
//! ## Features
//!
//! - **BM25 keyword search** with all term statistics computed per call over
//!   the supplied candidates (no persistent index)
//! - **Korean-aware tokenization** with Hangul character handling and
//!   Korean/English stop word removal
//! - **Score normalization** of both sources into `[0, 1]` with a
//!   divide-by-zero-safe divisor
//! - **Adaptive fusion weights** chosen from query shape (quoted phrases,
//!   digits, question forms), overridable per call
//! - **Weighted linear fusion** deduplicated by exact document text
//!
//! ## Architecture
//!
//! ```text
//! query + candidates → tokenizer → BM25 scorer → normalize ([0,1])
//! external vector hits           → normalize ([0,1])
//! both → fusion weights (explicit or adaptive) → linear fusion → top-k
//! ```
//!
//! The engine is purely synchronous and allocates all working state per
//! call; concurrent callers need no coordination.

/// BM25 keyword search: Hangul-aware tokenizer and Okapi BM25 scoring.
pub mod bm25;
/// Tuning constants: BM25 parameters and default fusion weights.
pub mod config;
/// Core document type with opaque JSON metadata.
pub mod document;
/// Hybrid fusion: result types, weight selection, normalization, combination.
pub mod search;
