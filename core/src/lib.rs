//! Lexical retrieval core: whitespace tokenization, stopword filtering, an
//! in-memory inverted index with smoothed IDF, BM25 ranking and a standalone
//! cosine similarity.
//!
//! ```
//! use quarry_core::{build_index, Bm25Params};
//!
//! let index = build_index(["the cat sat", "the dog ran", "cats and dogs"]).unwrap();
//! let result = index.search("cat dog");
//! assert_eq!(result.ids(), vec![0, 1]);
//! let ranked = result.rank(&index, Bm25Params::default());
//! assert_eq!(ranked.len(), 2);
//! ```

pub mod bm25;
pub mod error;
pub mod index;
pub mod query;
pub mod similarity;
pub mod stats;
pub mod stopwords;
pub mod tokenizer;

pub use bm25::{score_bm25, Bm25Params, CorpusStats, ScoredDocument};
pub use error::{Error, Result};
pub use index::{build_index, compute_idf, DocId, Document, InvertedIndex};
pub use query::{search, SearchResult};
pub use similarity::cosine_similarity;
pub use stats::{compute_document_frequency, compute_term_frequency};
pub use stopwords::{remove_stopwords, StopwordRegistry, StopwordSet, DEFAULT_LANGUAGE};
pub use tokenizer::{tokenize, Analyzer};
