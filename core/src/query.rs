use crate::bm25::{score_bm25, sort_ranked, Bm25Params, ScoredDocument};
use crate::index::{DocId, Document, InvertedIndex};
use serde::Serialize;
use std::collections::BTreeSet;

/// Candidate documents for one query. Borrowed from the index, unranked.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    /// Query tokens after normalization and stopword removal.
    pub query_terms: Vec<String>,
    /// Union of the postings of every query term, ascending by id.
    pub documents: Vec<&'a Document>,
}

impl<'a> SearchResult<'a> {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> Vec<DocId> {
        self.documents.iter().map(|d| d.id).collect()
    }

    /// BM25-score every candidate against `index`, best first.
    pub fn rank(&self, index: &InvertedIndex, params: Bm25Params) -> Vec<ScoredDocument> {
        let stats = index.corpus_stats();
        let idf = index.inverse_document_frequency();
        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument { id: doc.id, score: score_bm25(&self.query_terms, doc, idf, stats, params) })
            .collect();
        sort_ranked(&mut scored);
        scored
    }
}

/// Analyze `query` with the index's own pipeline and collect every document
/// containing at least one query term.
pub fn search<'a>(query: &str, index: &'a InvertedIndex) -> SearchResult<'a> {
    let query_terms = index.analyzer().analyze(query);

    let mut found: BTreeSet<DocId> = BTreeSet::new();
    for term in &query_terms {
        if let Some(ids) = index.postings(term) {
            found.extend(ids.iter().copied());
        }
    }

    let documents: Vec<&Document> = found.into_iter().filter_map(|id| index.document(id)).collect();
    tracing::debug!(terms = query_terms.len(), hits = documents.len(), "search");
    SearchResult { query_terms, documents }
}
