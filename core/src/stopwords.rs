//! Per-language stopword sets.
//!
//! Stopword lists live in a [`StopwordRegistry`] keyed by language code. The
//! built-in registry only knows English (`"en"`); other languages are added by
//! registering a new set, never by touching the filtering logic.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub type StopwordSet = HashSet<String>;

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en";

const ENGLISH: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves",
];

lazy_static! {
    static ref BUILTIN: StopwordRegistry = {
        let mut registry = StopwordRegistry::empty();
        registry.register(DEFAULT_LANGUAGE, ENGLISH.iter().copied());
        registry
    };
}

/// Language code → stopword set.
#[derive(Debug, Clone, Default)]
pub struct StopwordRegistry {
    sets: HashMap<String, Arc<StopwordSet>>,
}

impl StopwordRegistry {
    /// A registry with no languages at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The process-wide registry holding the built-in languages.
    pub fn global() -> &'static StopwordRegistry {
        &BUILTIN
    }

    /// An owned copy of the built-in registry, for callers that want to add languages.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Register (or replace) the stopword set for `language`.
    pub fn register<I, S>(&mut self, language: impl Into<String>, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: StopwordSet = words.into_iter().map(Into::into).collect();
        self.sets.insert(language.into(), Arc::new(set));
        self
    }

    pub fn resolve(&self, language: &str) -> Result<Arc<StopwordSet>> {
        self.sets
            .get(language)
            .cloned()
            .ok_or_else(|| Error::UnsupportedLanguage(language.to_string()))
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.sets.contains_key(language)
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Drop every token that is a stopword in `language`.
    ///
    /// The language is resolved before the input is looked at, so an unknown
    /// language fails even when `tokens` is empty.
    pub fn filter<S: AsRef<str>>(&self, tokens: &[S], language: &str) -> Result<Vec<String>> {
        let stopwords = self.resolve(language)?;
        if tokens.is_empty() {
            return Ok(Vec::new());
        }
        Ok(tokens
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|t| !stopwords.contains(*t))
            .map(str::to_string)
            .collect())
    }
}

/// Filter `tokens` against the global registry.
pub fn remove_stopwords<S: AsRef<str>>(tokens: &[S], language: &str) -> Result<Vec<String>> {
    StopwordRegistry::global().filter(tokens, language)
}
