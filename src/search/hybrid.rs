//! Hybrid fusion of BM25 keyword scores with external vector scores.
//!
//! Keyword scores come from [`bm25_search`] over the candidate set; vector
//! scores are supplied by the caller from an external similarity index. Both
//! score lists are normalized into `[0, 1]`, joined by exact document text,
//! and combined as a weighted linear sum.

use crate::bm25::{bm25_search, ScoredResult};
use crate::document::Document;
use crate::search::types::{HybridResult, VectorHit, VectorItem};
use crate::search::weights::{select_weights, FusionWeights};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Combines keyword and vector search results into one ranked list.
///
/// Runs BM25 over `documents` (over-fetching `top_k * 2` keyword results),
/// normalizes both score sources, and fuses them per document as
/// `weights.vector * v + weights.keyword * k`. Candidates are deduplicated
/// by exact text (first occurrence wins) and dropped when both normalized
/// scores are 0. When `weights` is `None` the pair is chosen by
/// [`select_weights`]. Returns at most `top_k` results sorted by descending
/// fused score.
pub fn combine_results<T: VectorItem>(
    query: &str,
    documents: &[Document],
    vector_results: &[VectorHit<T>],
    top_k: usize,
    weights: Option<FusionWeights>,
) -> Vec<HybridResult> {
    let weights = weights.unwrap_or_else(|| select_weights(query));
    tracing::debug!(
        vector_weight = weights.vector,
        keyword_weight = weights.keyword,
        candidates = documents.len(),
        "Hybrid search"
    );

    // Over-fetch keyword results so fusion has extra candidates to promote.
    let keyword_results = bm25_search(query, documents, top_k.saturating_mul(2));
    let vector_scores = normalize_vector_scores(vector_results);
    let keyword_scores = normalize_keyword_scores(&keyword_results);

    // (candidate index, fused score, vector score, keyword score)
    let mut candidates: Vec<(usize, f64, f64, f64)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(documents.len());
    for (i, doc) in documents.iter().enumerate() {
        if !seen.insert(doc.text.as_str()) {
            continue; // duplicate text, first occurrence already scored
        }
        let v = vector_scores.get(doc.text.as_str()).copied().unwrap_or(0.0);
        let k = keyword_scores.get(doc.text.as_str()).copied().unwrap_or(0.0);
        if v == 0.0 && k == 0.0 {
            continue;
        }
        candidates.push((i, weights.vector * v + weights.keyword * k, v, k));
    }

    // Partial sort: O(n log k) via min-heap of size k. Ties break toward
    // earlier candidates.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<usize>)>> =
        BinaryHeap::with_capacity(top_k + 1);
    for (pos, &(_, fused, _, _)) in candidates.iter().enumerate() {
        heap.push(Reverse((OrderedFloat(fused), Reverse(pos))));
        if heap.len() > top_k {
            heap.pop();
        }
    }
    let mut ranked: Vec<usize> = heap
        .into_iter()
        .map(|Reverse((_, Reverse(pos)))| pos)
        .collect();
    ranked.sort_unstable_by(|&a, &b| {
        candidates[b]
            .1
            .partial_cmp(&candidates[a].1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });

    let results: Vec<HybridResult> = ranked
        .into_iter()
        .map(|pos| {
            let (i, score, vector_score, keyword_score) = candidates[pos];
            let document = documents[i].clone();
            let metadata = document.metadata.clone();
            HybridResult {
                document,
                score,
                vector_score,
                keyword_score,
                metadata,
            }
        })
        .collect();

    tracing::debug!(results = results.len(), top_k, "Hybrid search complete");
    results
}

/// Normalizes raw vector similarity scores to `[0, 1]`, keyed by item text.
///
/// The divisor is the maximum raw score, floored at 1 so low-confidence
/// scores are never inflated. The maximum is taken over every hit, including
/// hits skipped below for missing text. Duplicate texts keep the last score.
fn normalize_vector_scores<'a, T: VectorItem>(
    vector_results: &'a [VectorHit<T>],
) -> HashMap<&'a str, f64> {
    if vector_results.is_empty() {
        return HashMap::new();
    }
    let divisor = vector_results
        .iter()
        .map(|hit| hit.score)
        .fold(1.0_f64, f64::max);

    let mut scores = HashMap::with_capacity(vector_results.len());
    for hit in vector_results {
        match hit.item.text() {
            Some(text) => {
                scores.insert(text, hit.score / divisor);
            }
            None => tracing::warn!("Vector hit has no extractable text, skipping"),
        }
    }
    tracing::debug!(count = scores.len(), max = divisor, "Normalized vector scores");
    scores
}

/// Normalizes raw BM25 scores to `[0, 1]`, keyed by document text.
/// Same divisor rule as [`normalize_vector_scores`].
fn normalize_keyword_scores(keyword_results: &[ScoredResult]) -> HashMap<&str, f64> {
    if keyword_results.is_empty() {
        return HashMap::new();
    }
    let divisor = keyword_results
        .iter()
        .map(|r| r.score)
        .fold(1.0_f64, f64::max);

    let scores: HashMap<&str, f64> = keyword_results
        .iter()
        .map(|r| (r.document.text.as_str(), r.score / divisor))
        .collect();
    tracing::debug!(count = scores.len(), max = divisor, "Normalized keyword scores");
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_doc(text: &str) -> Document {
        Document::from_text(text.to_string())
    }

    fn make_docs(texts: &[&str]) -> Vec<Document> {
        texts.iter().map(|t| make_doc(t)).collect()
    }

    fn make_hits(documents: &[Document], scores: &[f64]) -> Vec<VectorHit<String>> {
        documents
            .iter()
            .zip(scores)
            .map(|(d, &score)| VectorHit {
                item: d.text.clone(),
                score,
            })
            .collect()
    }

    fn no_hits() -> Vec<VectorHit<String>> {
        Vec::new()
    }

    // ── Normalization ──────────────────────────────────────────────────

    #[test]
    fn test_normalize_vector_scores_divides_by_max() {
        let hits = vec![
            VectorHit {
                item: "문서 하나".to_string(),
                score: 4.0,
            },
            VectorHit {
                item: "문서 둘째".to_string(),
                score: 2.0,
            },
        ];
        let scores = normalize_vector_scores(&hits);
        assert_eq!(scores["문서 하나"], 1.0);
        assert_eq!(scores["문서 둘째"], 0.5);
    }

    #[test]
    fn test_normalize_divisor_floors_at_one() {
        // Raw scores below 1 pass through undivided.
        let hits = vec![
            VectorHit {
                item: "문서 하나".to_string(),
                score: 0.5,
            },
            VectorHit {
                item: "문서 둘째".to_string(),
                score: 0.25,
            },
        ];
        let scores = normalize_vector_scores(&hits);
        assert_eq!(scores["문서 하나"], 0.5);
        assert_eq!(scores["문서 둘째"], 0.25);
    }

    #[test]
    fn test_normalize_empty_inputs() {
        assert!(normalize_vector_scores(&no_hits()).is_empty());
        assert!(normalize_keyword_scores(&[]).is_empty());
    }

    #[test]
    fn test_normalize_duplicate_text_keeps_last_score() {
        let hits = vec![
            VectorHit {
                item: "같은 텍스트".to_string(),
                score: 4.0,
            },
            VectorHit {
                item: "같은 텍스트".to_string(),
                score: 2.0,
            },
        ];
        let scores = normalize_vector_scores(&hits);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores["같은 텍스트"], 0.5);
    }

    #[test]
    fn test_normalize_keyword_scores_divides_by_max() {
        let results = vec![
            ScoredResult {
                document: make_doc("가나다 라마"),
                score: 2.0,
                metadata: HashMap::new(),
            },
            ScoredResult {
                document: make_doc("바사아 자차"),
                score: 1.0,
                metadata: HashMap::new(),
            },
        ];
        let scores = normalize_keyword_scores(&results);
        assert_eq!(scores["가나다 라마"], 1.0);
        assert_eq!(scores["바사아 자차"], 0.5);
    }

    // ── Fusion ─────────────────────────────────────────────────────────

    #[test]
    fn test_combine_with_explicit_weights() {
        let documents = make_docs(&[
            "인공지능은 기계가 학습하는 기술입니다.",
            "딥러닝은 신경망을 이용한 방법입니다.",
            "자연어 처리는 텍스트를 다룹니다.",
        ]);
        let hits = make_hits(&documents, &[0.9, 0.7, 0.5]);
        let weights = FusionWeights {
            vector: 0.6,
            keyword: 0.4,
        };
        let results = combine_results("인공지능 학습", &documents, &hits, 3, Some(weights));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].document.text, documents[0].text);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score, "results must be sorted");
        }
        for r in &results {
            assert!(r.score > 0.0 && r.score <= 1.0);
            assert!((0.0..=1.0).contains(&r.vector_score));
            assert!((0.0..=1.0).contains(&r.keyword_score));
        }
        // 0.9 / max(0.9, 1) stays 0.9, weighted by 0.6
        assert!((results[0].score - 0.54).abs() < 1e-12);
    }

    #[test]
    fn test_combine_korean_corpus_end_to_end() {
        let documents = make_docs(&[
            "인공지능은 컴퓨터가 학습하는 기술입니다.",
            "머신러닝은 인공지능의 한 분야입니다.",
            "딥러닝은 신경망을 사용합니다.",
        ]);
        let hits = make_hits(&documents, &[0.9, 0.7, 0.5]);
        let results = combine_results("인공지능 학습", &documents, &hits, 3, None);

        assert!(!results.is_empty() && results.len() <= 3);
        assert_eq!(
            results[0].document.text, documents[0].text,
            "document relevant to both query terms ranks first"
        );
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_keyword_only_fusion() {
        let documents = make_docs(&[
            "검색 엔진 기술 문서",
            "데이터 분석 방법",
            "검색 알고리즘 연구",
            "웹툰 서비스 운영",
            "모바일 개발 사례",
        ]);
        let results = combine_results("검색", &documents, &no_hits(), 5, None);

        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.vector_score, 0.0);
            assert!(r.keyword_score > 0.0);
        }
        // Equal TF, shorter document wins
        assert_eq!(results[0].document.text, "검색 알고리즘 연구");
    }

    #[test]
    fn test_vector_only_fusion_on_empty_query() {
        let documents = make_docs(&["설명 문서 내용", "다른 문서 내용"]);
        let hits = make_hits(&documents, &[0.8, 0.4]);
        let results = combine_results("", &documents, &hits, 5, None);

        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.keyword_score, 0.0);
            assert!(r.vector_score > 0.0);
        }
        assert_eq!(results[0].document.text, "설명 문서 내용");
    }

    #[test]
    fn test_adaptive_interrogative_weights_applied() {
        let documents = make_docs(&["설명 문서 내용"]);
        let hits = make_hits(&documents, &[2.0]);
        let results = combine_results("무엇인가요", &documents, &hits, 5, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].vector_score, 1.0);
        // Interrogative rule selects (0.7, 0.3); keyword side is empty
        assert!((results[0].score - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_weights_not_renormalized() {
        let documents = make_docs(&["공유 검색 내용", "다른 문서 하나", "다른 문서 둘째"]);
        let hits = make_hits(&documents[..1], &[1.0]);
        let weights = FusionWeights {
            vector: 0.9,
            keyword: 0.9,
        };
        let results = combine_results("검색", &documents, &hits, 5, Some(weights));

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert!(r.score > 1.0, "weights summing above 1 may exceed 1");
        assert!((r.score - (0.9 * r.vector_score + 0.9 * r.keyword_score)).abs() < 1e-12);
    }

    // ── Deduplication and exclusion ────────────────────────────────────

    #[test]
    fn test_dedup_by_exact_text() {
        let documents = make_docs(&["중복된 내용 문서", "중복된 내용 문서", "다른 내용 문서"]);
        let hits = vec![
            VectorHit {
                item: "중복된 내용 문서".to_string(),
                score: 0.8,
            },
            VectorHit {
                item: "다른 내용 문서".to_string(),
                score: 0.4,
            },
        ];
        let results = combine_results("", &documents, &hits, 5, None);

        assert_eq!(results.len(), 2);
        let dup_count = results
            .iter()
            .filter(|r| r.document.text == "중복된 내용 문서")
            .count();
        assert_eq!(dup_count, 1);
    }

    #[test]
    fn test_unmatched_documents_excluded() {
        let documents = make_docs(&["포함된 문서 내용", "무관한 다른 내용"]);
        let hits = make_hits(&documents[..1], &[1.0]);
        let results = combine_results("", &documents, &hits, 5, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.text, "포함된 문서 내용");
        for r in &results {
            assert!(
                r.vector_score != 0.0 || r.keyword_score != 0.0,
                "a result must have at least one nonzero source score"
            );
        }
    }

    #[test]
    fn test_empty_documents() {
        let documents = make_docs(&["어딘가의 문서"]);
        let hits = make_hits(&documents, &[0.9]);
        let results = combine_results("질의", &[], &hits, 5, None);
        assert!(results.is_empty());
    }

    #[test]
    fn test_top_k_truncation() {
        let documents = make_docs(&[
            "문서 영번", "문서 일번", "문서 이번", "문서 삼번", "문서 사번", "문서 오번",
        ]);
        let hits = make_hits(&documents, &[0.9, 0.8, 0.7, 0.6, 0.5, 0.4]);
        let results = combine_results("", &documents, &hits, 2, None);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.text, "문서 영번");
        assert_eq!(results[1].document.text, "문서 일번");
    }

    // ── Vector item extraction ─────────────────────────────────────────

    #[test]
    fn test_unextractable_hit_skipped_but_raises_divisor() {
        enum TestItem {
            WithText(String),
            NoText,
        }
        impl VectorItem for TestItem {
            fn text(&self) -> Option<&str> {
                match self {
                    TestItem::WithText(t) => Some(t),
                    TestItem::NoText => None,
                }
            }
        }

        let documents = make_docs(&["추출 가능한 문서"]);
        let hits = vec![
            VectorHit {
                item: TestItem::NoText,
                score: 100.0,
            },
            VectorHit {
                item: TestItem::WithText("추출 가능한 문서".to_string()),
                score: 50.0,
            },
        ];
        let results = combine_results("", &documents, &hits, 5, None);

        assert_eq!(results.len(), 1);
        // Divisor is max over all hits (100), including the skipped one
        assert_eq!(results[0].vector_score, 0.5);
    }

    #[test]
    fn test_metadata_passthrough() {
        let mut metadata = HashMap::new();
        metadata.insert("id".to_string(), json!("f1"));
        metadata.insert("type".to_string(), json!("pdf_content"));
        metadata.insert("pageNumber".to_string(), json!(3));
        let documents = vec![Document::new("본문 텍스트 내용".to_string(), metadata)];
        let hits = make_hits(&documents, &[0.9]);
        let results = combine_results("", &documents, &hits, 5, None);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].metadata["type"], json!("pdf_content"));
        assert_eq!(results[0].metadata["pageNumber"], json!(3));
        assert_eq!(results[0].metadata, results[0].document.metadata);
    }
}
