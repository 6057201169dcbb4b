//! Term and document frequency accounting.

use std::collections::HashMap;

/// Occurrence count of every token; tokens that never occur are absent, never zero.
pub fn compute_term_frequency<S: AsRef<str>>(tokens: &[S]) -> HashMap<String, u32> {
    let mut tf: HashMap<String, u32> = HashMap::new();
    for token in tokens {
        *tf.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    tf
}

/// Number of documents whose term-frequency map has a nonzero count for `term`.
pub fn compute_document_frequency(term: &str, corpus_term_frequencies: &[HashMap<String, u32>]) -> u32 {
    corpus_term_frequencies
        .iter()
        .filter(|tf| tf.get(term).is_some_and(|&count| count > 0))
        .count() as u32
}
