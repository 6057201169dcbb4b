use crate::bm25::CorpusStats;
use crate::error::{Error, Result};
use crate::query::{self, SearchResult};
use crate::stats::compute_term_frequency;
use crate::tokenizer::Analyzer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// One indexed document. Immutable once the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    /// Token count after stopword removal.
    pub length: u32,
    pub term_frequency: HashMap<String, u32>,
}

impl Document {
    /// Occurrences of `term` in this document, 0 when absent.
    pub fn frequency(&self, term: &str) -> u32 {
        self.term_frequency.get(term).copied().unwrap_or(0)
    }
}

/// Read-only inverted index over an in-memory corpus.
///
/// Documents are stored in an arena indexed by [`DocId`]; postings lists hold
/// ids in ascending order, each id at most once per term.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    documents: Vec<Document>,
    postings: HashMap<String, Vec<DocId>>,
    document_frequency: HashMap<String, u32>,
    inverse_document_frequency: HashMap<String, f64>,
    total_length: u64,
    analyzer: Analyzer,
}

impl InvertedIndex {
    /// Build with the English analyzer from the global stopword registry.
    pub fn build<I, S>(corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let analyzer = Analyzer::english()?;
        Self::build_with(corpus, &analyzer)
    }

    /// Build in a single pass over `corpus`; ids follow corpus order.
    ///
    /// Fails with [`Error::CapacityExceeded`] when the corpus or a single
    /// document does not fit the `u32` id and length types.
    pub fn build_with<I, S>(corpus: I, analyzer: &Analyzer) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut documents: Vec<Document> = Vec::new();
        let mut postings: HashMap<String, Vec<DocId>> = HashMap::new();
        let mut document_frequency: HashMap<String, u32> = HashMap::new();
        let mut total_length: u64 = 0;

        for (pos, text) in corpus.into_iter().enumerate() {
            let doc_id = checked_doc_id(pos)?;
            let tokens = analyzer.analyze(text.as_ref());
            let term_frequency = compute_term_frequency(&tokens);

            // tf keys are the distinct terms, so each doc lands once per postings list
            for term in term_frequency.keys() {
                let list = postings.entry(term.clone()).or_default();
                if list.last() != Some(&doc_id) {
                    list.push(doc_id);
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }

            let length = checked_length(doc_id, tokens.len())?;
            total_length += u64::from(length);
            documents.push(Document { id: doc_id, length, term_frequency });
        }

        let inverse_document_frequency = compute_idf(&document_frequency, documents.len());
        tracing::debug!(
            num_docs = documents.len(),
            num_terms = postings.len(),
            language = analyzer.language(),
            "built inverted index"
        );

        Ok(Self {
            documents,
            postings,
            document_frequency,
            inverse_document_frequency,
            total_length,
            analyzer: analyzer.clone(),
        })
    }

    pub fn corpus_size(&self) -> usize {
        self.documents.len()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.get(id as usize)
    }

    /// Ids of documents containing `term`, ascending.
    pub fn postings(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn document_frequency(&self) -> &HashMap<String, u32> {
        &self.document_frequency
    }

    pub fn inverse_document_frequency(&self) -> &HashMap<String, f64> {
        &self.inverse_document_frequency
    }

    /// IDF of `term`, 0 for terms that were never indexed.
    pub fn idf(&self, term: &str) -> f64 {
        self.inverse_document_frequency.get(term).copied().unwrap_or(0.0)
    }

    /// Mean filtered document length over the whole corpus (0 for an empty corpus).
    pub fn average_document_length(&self) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        self.total_length as f64 / self.documents.len() as f64
    }

    pub fn corpus_stats(&self) -> CorpusStats {
        CorpusStats {
            corpus_size: self.corpus_size(),
            average_document_length: self.average_document_length(),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn search(&self, query: &str) -> SearchResult<'_> {
        query::search(query, self)
    }
}

fn checked_doc_id(pos: usize) -> Result<DocId> {
    DocId::try_from(pos).map_err(|_| Error::CapacityExceeded(format!("document #{pos} exceeds the u32 id space")))
}

fn checked_length(id: DocId, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::CapacityExceeded(format!("document {id} has {len} tokens")))
}

/// Smoothed BM25 IDF: `ln(1 + (N - df + 0.5) / (df + 0.5))`.
///
/// Not clamped: a term in most of the corpus gets a weight close to zero.
pub fn compute_idf(document_frequency: &HashMap<String, u32>, corpus_size: usize) -> HashMap<String, f64> {
    let n = corpus_size as f64;
    document_frequency
        .iter()
        .map(|(term, &df)| {
            let df = df as f64;
            (term.clone(), (1.0 + (n - df + 0.5) / (df + 0.5)).ln())
        })
        .collect()
}

/// Build an index over `corpus` with the default English pipeline.
pub fn build_index<I, S>(corpus: I) -> Result<InvertedIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    InvertedIndex::build(corpus)
}
