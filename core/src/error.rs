use thiserror::Error;

/// Errors surfaced by the retrieval core.
///
/// Unknown terms are never an error: they carry zero weight everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No stopword set is registered for the language code.
    #[error("no stopword set registered for language {0:?}")]
    UnsupportedLanguage(String),
    /// Cosine similarity was asked to compare vectors of different lengths.
    #[error("vector dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
    /// The corpus or a document is too large for the `u32` id and length types.
    #[error("index capacity exceeded: {0}")]
    CapacityExceeded(String),
    /// One of the vectors has zero norm, so the angle is undefined.
    #[error("cosine similarity is undefined for a zero-norm vector")]
    DegenerateVector,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
