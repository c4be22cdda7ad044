// Stopword set used by the stopword-ratio feature.
//
// Defaults to the English list shipped with the `stop-words` crate. A custom
// set can be supplied for other languages or for reproducible tests.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use super::tokenize::clean_word;

#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words)
    }

    /// Build a set from arbitrary words. Entries are normalized with
    /// `clean_word` so they compare equal to tokens from the text.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| clean_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
