//! BM25 Okapi scoring over a per-query candidate set.
//!
//! Scores candidate documents against a query using the BM25 formula with
//! `k1` and `b` parameters from [`crate::config`]. All term statistics (term
//! frequency, document frequency, average document length) are computed per
//! call over the candidate slice; nothing is indexed or cached across calls.

use crate::bm25::tokenizer::{tokenize, Tokens};
use crate::config;
use crate::document::Document;
use ordered_float::OrderedFloat;
use serde_json::Value;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// A document with its raw BM25 relevance score.
///
/// Returned by [`bm25_search`] sorted by descending score. Scores are
/// unnormalized; only positive scores are returned.
#[derive(Debug, Clone)]
pub struct ScoredResult {
    /// The matched document.
    pub document: Document,
    /// Raw BM25 score (always > 0 in returned results).
    pub score: f64,
    /// Copy of the document's metadata.
    pub metadata: HashMap<String, Value>,
}

/// BM25 Okapi scoring for a query against a candidate document set.
/// Returns matching documents sorted by descending score, at most `top_k`,
/// keeping only documents with score > 0.
pub fn bm25_search(query: &str, documents: &[Document], top_k: usize) -> Vec<ScoredResult> {
    if query.is_empty() || documents.is_empty() {
        return Vec::new();
    }
    tracing::debug!(query = %query, candidates = documents.len(), "BM25 search");
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        tracing::warn!(query = %query, "Query tokenized to no terms");
        return Vec::new();
    }

    let doc_tokens: Vec<Tokens> = documents.iter().map(|d| tokenize(&d.text)).collect();
    let tf_tables: Vec<HashMap<&str, u32>> = doc_tokens.iter().map(term_frequencies).collect();
    let avgdl =
        doc_tokens.iter().map(Tokens::len).sum::<usize>() as f64 / documents.len() as f64;
    let idf = idf_table(&query_tokens, &tf_tables, documents.len());

    // Partial sort: O(n log k) via min-heap of size k. Ties break toward
    // earlier candidates.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<usize>)>> =
        BinaryHeap::with_capacity(top_k + 1);
    for (i, tf_table) in tf_tables.iter().enumerate() {
        let score =
            score_document(&query_tokens, tf_table, doc_tokens[i].len() as f64, avgdl, &idf);
        if score > 0.0 {
            heap.push(Reverse((OrderedFloat(score), Reverse(i))));
            if heap.len() > top_k {
                heap.pop();
            }
        }
    }
    let mut ranked: Vec<(usize, f64)> = heap
        .into_iter()
        .map(|Reverse((s, Reverse(i)))| (i, s.0))
        .collect();
    ranked.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    tracing::debug!(results = ranked.len(), top_k, "BM25 search complete");

    ranked
        .into_iter()
        .map(|(i, score)| {
            let document = documents[i].clone();
            let metadata = document.metadata.clone();
            ScoredResult {
                document,
                score,
                metadata,
            }
        })
        .collect()
}

/// Term frequency table for one document's tokens.
fn term_frequencies(tokens: &Tokens) -> HashMap<&str, u32> {
    let mut tf = HashMap::with_capacity(tokens.len());
    for token in tokens.iter() {
        *tf.entry(token).or_insert(0) += 1;
    }
    tf
}

/// IDF per query token, computed once over the whole candidate set.
/// IDF: ln((N - df + 0.5) / (df + 0.5)); negative for terms in more than
/// half the candidates, 0 for terms absent from every candidate.
fn idf_table<'a>(
    query_tokens: &'a Tokens,
    tf_tables: &[HashMap<&str, u32>],
    doc_count: usize,
) -> HashMap<&'a str, f64> {
    let n = doc_count as f64;
    query_tokens
        .iter()
        .map(|token| {
            let df = tf_tables.iter().filter(|tf| tf.contains_key(token)).count() as f64;
            let value = if df == 0.0 {
                0.0
            } else {
                ((n - df + 0.5) / (df + 0.5)).ln()
            };
            (token, value)
        })
        .collect()
}

/// BM25 score of one document against the query tokens.
/// Duplicate query terms contribute once per occurrence.
fn score_document(
    query_tokens: &Tokens,
    tf_table: &HashMap<&str, u32>,
    doc_len: f64,
    avgdl: f64,
    idf: &HashMap<&str, f64>,
) -> f64 {
    if doc_len == 0.0 || avgdl == 0.0 {
        return 0.0;
    }
    let k1 = config::BM25_K1;
    let b = config::BM25_B;

    let mut score = 0.0;
    for token in query_tokens.iter() {
        if let Some(&tf) = tf_table.get(token) {
            let tf = tf as f64;
            let tf_norm = (tf * (k1 + 1.0)) / (tf + k1 * (1.0 - b + b * doc_len / avgdl));
            score += idf.get(token).copied().unwrap_or(0.0) * tf_norm;
        }
    }
    score
}
