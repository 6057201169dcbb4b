use crate::error::Result;
use crate::stopwords::{StopwordRegistry, StopwordSet, DEFAULT_LANGUAGE};
use std::sync::Arc;

/// Split `text` on whitespace, lowercasing every token when `normalize` is set.
///
/// Punctuation is left attached: `"cat."` and `"cat"` are different tokens.
pub fn tokenize(text: &str, normalize: bool) -> Vec<String> {
    text.split_whitespace()
        .map(|token| if normalize { token.to_lowercase() } else { token.to_string() })
        .collect()
}

/// Normalizing tokenizer bound to one resolved stopword set.
///
/// The index keeps the analyzer it was built with so queries go through the
/// exact same pipeline as documents.
#[derive(Debug, Clone)]
pub struct Analyzer {
    language: String,
    stopwords: Arc<StopwordSet>,
}

impl Analyzer {
    /// Resolve `language` against `registry`.
    pub fn new(registry: &StopwordRegistry, language: &str) -> Result<Self> {
        let stopwords = registry.resolve(language)?;
        Ok(Self { language: language.to_string(), stopwords })
    }

    /// Resolve `language` against the global registry.
    pub fn for_language(language: &str) -> Result<Self> {
        Self::new(StopwordRegistry::global(), language)
    }

    pub fn english() -> Result<Self> {
        Self::for_language(DEFAULT_LANGUAGE)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Tokenize (normalized) and drop stopwords.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = tokenize(text, true);
        tokens.retain(|t| !self.stopwords.contains(t));
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(tokenize("  the\tcat\n sat ", false), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn normalize_controls_case() {
        assert_eq!(tokenize("Graph MINORS", true), vec!["graph", "minors"]);
        assert_eq!(tokenize("Graph MINORS", false), vec!["Graph", "MINORS"]);
    }

    #[test]
    fn empty_input_gives_no_tokens() {
        assert!(tokenize("", true).is_empty());
        assert!(tokenize(" \t\n", false).is_empty());
    }

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(tokenize("Cats, dogs.", true), vec!["cats,", "dogs."]);
    }

    #[test]
    fn analyzer_normalizes_before_filtering() {
        let analyzer = Analyzer::english().unwrap();
        assert_eq!(analyzer.analyze("The Cat AND the Hat"), vec!["cat", "hat"]);
        assert_eq!(analyzer.language(), "en");
    }

    #[test]
    fn analyzer_rejects_unknown_language() {
        assert!(Analyzer::for_language("klingon").is_err());
    }
}
