//! BM25 relevance scoring.
//!
//! Length normalization divides a document's length by the corpus-wide
//! average (`sum(lengths) / N`), computed once when the index is built.

use crate::index::{DocId, Document};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_K1: f64 = 1.5;
pub const DEFAULT_B: f64 = 0.75;

/// Tunable BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    /// Term-frequency saturation.
    pub k1: f64,
    /// Length-normalization strength, 0 disables it.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: DEFAULT_K1, b: DEFAULT_B }
    }
}

/// Corpus-level numbers the scorer needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub corpus_size: usize,
    pub average_document_length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub id: DocId,
    pub score: f64,
}

/// Score one document against already analyzed query terms.
///
/// Terms missing from the document are skipped; terms missing from `idf`
/// weigh zero. A term repeated in the query is counted once per occurrence.
pub fn score_bm25<S: AsRef<str>>(
    query_terms: &[S],
    document: &Document,
    idf: &HashMap<String, f64>,
    corpus: CorpusStats,
    params: Bm25Params,
) -> f64 {
    let Bm25Params { k1, b } = params;
    let doc_len = document.length as f64;
    let length_ratio = if corpus.corpus_size == 0 || corpus.average_document_length <= 0.0 {
        1.0
    } else {
        doc_len / corpus.average_document_length
    };

    let mut score = 0.0;
    for term in query_terms {
        let term = term.as_ref();
        let freq = document.frequency(term);
        if freq == 0 {
            continue;
        }
        let freq = freq as f64;
        let idf_t = idf.get(term).copied().unwrap_or(0.0);
        let numerator = idf_t * freq * (k1 + 1.0);
        let denominator = freq + k1 * (1.0 - b + b * length_ratio);
        score += numerator / denominator;
    }
    score
}

/// Highest score first, lower id first on ties.
pub(crate) fn sort_ranked(scored: &mut [ScoredDocument]) {
    scored.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.id.cmp(&b.id),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;

    fn doc(id: DocId, terms: &[(&str, u32)]) -> Document {
        let term_frequency: HashMap<String, u32> = terms.iter().map(|(t, c)| (t.to_string(), *c)).collect();
        let length = term_frequency.values().sum();
        Document { id, length, term_frequency }
    }

    #[test]
    fn defaults() {
        let p = Bm25Params::default();
        assert_eq!(p.k1, 1.5);
        assert_eq!(p.b, 0.75);
    }

    #[test]
    fn params_deserialize_with_partial_fields() {
        let p: Bm25Params = serde_json::from_str(r#"{"k1": 2.0}"#).unwrap();
        assert_eq!(p, Bm25Params { k1: 2.0, b: DEFAULT_B });
    }

    #[test]
    fn absent_terms_score_zero() {
        let d = doc(0, &[("cat", 1), ("sat", 1)]);
        let idf: HashMap<String, f64> = [("dog".to_string(), 1.0)].into_iter().collect();
        let stats = CorpusStats { corpus_size: 3, average_document_length: 2.0 };
        assert_eq!(score_bm25(&["dog", "unicorn"], &d, &idf, stats, Bm25Params::default()), 0.0);
    }

    #[test]
    fn term_missing_from_idf_adds_nothing() {
        let d = doc(0, &[("cat", 2)]);
        let stats = CorpusStats { corpus_size: 1, average_document_length: 2.0 };
        assert_eq!(score_bm25(&["cat"], &d, &HashMap::new(), stats, Bm25Params::default()), 0.0);
    }

    #[test]
    fn pins_corpus_average_normalization() {
        // len 4 against a corpus average of 2: ratio 2
        let d = doc(0, &[("cat", 2), ("sat", 2)]);
        let idf: HashMap<String, f64> = [("cat".to_string(), 0.5)].into_iter().collect();
        let stats = CorpusStats { corpus_size: 5, average_document_length: 2.0 };
        let got = score_bm25(&["cat"], &d, &idf, stats, Bm25Params::default());
        let expected = 0.5 * 2.0 * 2.5 / (2.0 + 1.5 * (1.0 - 0.75 + 0.75 * 2.0));
        assert!((got - expected).abs() < 1e-12, "got {got}, expected {expected}");
    }

    #[test]
    fn shorter_document_wins_at_equal_frequency() {
        let idx = build_index(["rust", "rust compiler borrow checker lifetimes", "python"]).unwrap();
        let stats = idx.corpus_stats();
        let idf = idx.inverse_document_frequency();
        let p = Bm25Params::default();
        let short = score_bm25(&["rust"], idx.document(0).unwrap(), idf, stats, p);
        let long = score_bm25(&["rust"], idx.document(1).unwrap(), idf, stats, p);
        assert!(short > long);
    }

    #[test]
    fn b_zero_ignores_length() {
        let idf: HashMap<String, f64> = [("x".to_string(), 1.0)].into_iter().collect();
        let stats = CorpusStats { corpus_size: 2, average_document_length: 3.0 };
        let p = Bm25Params { k1: 1.2, b: 0.0 };
        let short = score_bm25(&["x"], &doc(0, &[("x", 1)]), &idf, stats, p);
        let long = score_bm25(&["x"], &doc(1, &[("x", 1), ("y", 9)]), &idf, stats, p);
        assert!((short - long).abs() < 1e-12);
    }

    #[test]
    fn repeated_query_term_counts_twice() {
        let d = doc(0, &[("cat", 1)]);
        let idf: HashMap<String, f64> = [("cat".to_string(), 1.0)].into_iter().collect();
        let stats = CorpusStats { corpus_size: 1, average_document_length: 1.0 };
        let once = score_bm25(&["cat"], &d, &idf, stats, Bm25Params::default());
        let twice = score_bm25(&["cat", "cat"], &d, &idf, stats, Bm25Params::default());
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }

    #[test]
    fn degenerate_average_falls_back_to_unit_ratio() {
        let d = doc(0, &[("cat", 1)]);
        let idf: HashMap<String, f64> = [("cat".to_string(), 1.0)].into_iter().collect();
        let stats = CorpusStats { corpus_size: 0, average_document_length: 0.0 };
        let got = score_bm25(&["cat"], &d, &idf, stats, Bm25Params::default());
        assert!((got - 2.5 / 2.5).abs() < 1e-12);
    }

    #[test]
    fn ranking_breaks_ties_by_id() {
        let mut v = vec![
            ScoredDocument { id: 3, score: 1.0 },
            ScoredDocument { id: 1, score: 2.0 },
            ScoredDocument { id: 0, score: 1.0 },
        ];
        sort_ranked(&mut v);
        let ids: Vec<DocId> = v.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 0, 3]);
    }
}
