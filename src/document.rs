//! Core document type for the ranking engine.
//!
//! A `Document` is an immutable ranking candidate with text content and
//! arbitrary JSON metadata. The engine never inspects metadata; it is copied
//! into results unchanged. Deduplication and score joining key on the exact
//! text content.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A candidate document with text content and opaque metadata.
///
/// Identity for deduplication purposes is the exact text content, not a
/// separate ID. Callers that need a stable identifier keep it in `metadata`
/// (conventionally under `"id"`), which passes through to results untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Text content, scored by BM25 and used as the join key for fusion.
    pub text: String,
    /// Arbitrary key-value metadata, never inspected by the engine.
    pub metadata: HashMap<String, Value>,
}

impl Document {
    /// Creates a document with text and metadata.
    pub fn new(text: String, metadata: HashMap<String, Value>) -> Self {
        Self { text, metadata }
    }

    /// Creates a document with empty metadata.
    pub fn from_text(text: String) -> Self {
        Self {
            text,
            metadata: HashMap::new(),
        }
    }
}
