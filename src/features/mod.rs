// Feature extractors: scalar style statistics computed from one text.
//
// `TokenizedText` performs the normalization pass once; every extractor reads
// from it. The free functions at the bottom tokenize on their own and exist
// for callers that only need a single statistic.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{AttributionError, EmptyKind, Result};
use crate::text::stopwords::StopwordSet;
use crate::text::tokenize::{get_phrases, get_sentences, normalized_words};

/// One normalization pass over a text: cleaned words and sentences.
#[derive(Debug, Clone)]
pub struct TokenizedText<'a> {
    raw: &'a str,
    /// Non-empty normalized words in text order
    words: Vec<String>,
    sentences: Vec<&'a str>,
}

impl<'a> TokenizedText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            words: normalized_words(raw).collect(),
            sentences: get_sentences(raw),
        }
    }

    fn word_count(&self) -> Result<f64> {
        match self.words.len() {
            0 => Err(AttributionError::EmptyInput {
                kind: EmptyKind::Words,
            }),
            n => Ok(n as f64),
        }
    }

    fn sentence_count(&self) -> Result<f64> {
        match self.sentences.len() {
            0 => Err(AttributionError::EmptyInput {
                kind: EmptyKind::Sentences,
            }),
            n => Ok(n as f64),
        }
    }

    pub fn average_word_length(&self) -> Result<f64> {
        let total = self.word_count()?;
        let chars: usize = self.words.iter().map(|w| w.chars().count()).sum();
        Ok(chars as f64 / total)
    }

    pub fn different_to_total(&self) -> Result<f64> {
        let total = self.word_count()?;
        let unique: HashSet<&str> = self.words.iter().map(String::as_str).collect();
        Ok(unique.len() as f64 / total)
    }

    pub fn exactly_once_to_total(&self) -> Result<f64> {
        let total = self.word_count()?;
        let mut seen: HashSet<&str> = HashSet::new();
        let mut once: HashSet<&str> = HashSet::new();
        for word in &self.words {
            if seen.insert(word.as_str()) {
                once.insert(word.as_str());
            } else {
                // Third and later occurrences are no-ops
                once.remove(word.as_str());
            }
        }
        Ok(once.len() as f64 / total)
    }

    pub fn average_sentence_length(&self) -> Result<f64> {
        let sentences = self.sentence_count()?;
        let words: usize = self
            .sentences
            .iter()
            .map(|s| normalized_words(s).count())
            .sum();
        Ok(words as f64 / sentences)
    }

    pub fn average_sentence_complexity(&self) -> Result<f64> {
        let sentences = self.sentence_count()?;
        let phrases: usize = self.sentences.iter().map(|s| get_phrases(s).len()).sum();
        Ok(phrases as f64 / sentences)
    }

    /// ASCII punctuation characters over all characters, whitespace included.
    pub fn punctuation_density(&self) -> Result<f64> {
        let total = self.raw.chars().count();
        if total == 0 {
            return Err(AttributionError::EmptyInput {
                kind: EmptyKind::Characters,
            });
        }
        let punctuation = self
            .raw
            .chars()
            .filter(|c| c.is_ascii_punctuation())
            .count();
        Ok(punctuation as f64 / total as f64)
    }

    pub fn stopword_ratio(&self, stopwords: &StopwordSet) -> Result<f64> {
        let total = self.word_count()?;
        let hits = self.words.iter().filter(|w| stopwords.contains(w.as_str())).count();
        Ok(hits as f64 / total)
    }
}

/// One dimension of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    AverageWordLength,
    LexicalDiversity,
    HapaxRatio,
    AverageSentenceLength,
    SentenceComplexity,
    PunctuationDensity,
    StopwordRatio,
}

impl Feature {
    /// Short label used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Feature::AverageWordLength => "avg word length",
            Feature::LexicalDiversity => "lexical diversity",
            Feature::HapaxRatio => "hapax ratio",
            Feature::AverageSentenceLength => "avg sentence length",
            Feature::SentenceComplexity => "sentence complexity",
            Feature::PunctuationDensity => "punctuation density",
            Feature::StopwordRatio => "stopword ratio",
        }
    }

    pub fn compute(self, text: &TokenizedText<'_>, stopwords: &StopwordSet) -> Result<f64> {
        match self {
            Feature::AverageWordLength => text.average_word_length(),
            Feature::LexicalDiversity => text.different_to_total(),
            Feature::HapaxRatio => text.exactly_once_to_total(),
            Feature::AverageSentenceLength => text.average_sentence_length(),
            Feature::SentenceComplexity => text.average_sentence_complexity(),
            Feature::PunctuationDensity => text.punctuation_density(),
            Feature::StopwordRatio => text.stopword_ratio(stopwords),
        }
    }
}

pub fn average_word_length(text: &str) -> Result<f64> {
    TokenizedText::new(text).average_word_length()
}

pub fn different_to_total(text: &str) -> Result<f64> {
    TokenizedText::new(text).different_to_total()
}

pub fn exactly_once_to_total(text: &str) -> Result<f64> {
    TokenizedText::new(text).exactly_once_to_total()
}

pub fn average_sentence_length(text: &str) -> Result<f64> {
    TokenizedText::new(text).average_sentence_length()
}

pub fn average_sentence_complexity(text: &str) -> Result<f64> {
    TokenizedText::new(text).average_sentence_complexity()
}

pub fn punctuation_density(text: &str) -> Result<f64> {
    TokenizedText::new(text).punctuation_density()
}

pub fn stopword_ratio(text: &str, stopwords: &StopwordSet) -> Result<f64> {
    TokenizedText::new(text).stopword_ratio(stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEARL: &str = "A pearl! Pearl! Lustrous pearl! Rare. What a nice find.";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pearl_word_statistics() {
        assert!(close(average_word_length(PEARL).unwrap(), 4.1));
        assert!(close(different_to_total(PEARL).unwrap(), 0.7));
        assert!(close(exactly_once_to_total(PEARL).unwrap(), 0.5));
    }

    #[test]
    fn test_pearl_sentence_statistics() {
        assert!(close(average_sentence_length(PEARL).unwrap(), 2.0));
        assert!(close(average_sentence_complexity(PEARL).unwrap(), 1.0));
    }

    #[test]
    fn test_hapax_third_occurrence_is_noop() {
        assert!(close(exactly_once_to_total("the the the the").unwrap(), 0.0));
        assert!(close(
            exactly_once_to_total("hello world hello").unwrap(),
            1.0 / 3.0
        ));
    }

    #[test]
    fn test_sentence_complexity_counts_phrases() {
        let text = "A pearl! Pearl! Lustrous pearl! Rare, what a nice find.";
        assert!(close(average_sentence_complexity(text).unwrap(), 1.25));
        let text = "First: second, third; fourth. Simple sentence.";
        assert!(close(average_sentence_complexity(text).unwrap(), 2.5));
    }

    #[test]
    fn test_average_sentence_length_uneven() {
        assert!(close(
            average_sentence_length("Short. Very short sentence here.").unwrap(),
            2.5
        ));
        assert!(close(
            average_sentence_length("No punctuation means one sentence").unwrap(),
            5.0
        ));
    }

    #[test]
    fn test_punctuation_only_fails_on_words() {
        let err = average_word_length("...").unwrap_err();
        assert!(matches!(
            err,
            AttributionError::EmptyInput {
                kind: EmptyKind::Words
            }
        ));
    }

    #[test]
    fn test_terminators_only_fails_on_sentences() {
        let err = average_sentence_length("  .  ?  ").unwrap_err();
        assert!(matches!(
            err,
            AttributionError::EmptyInput {
                kind: EmptyKind::Sentences
            }
        ));
    }

    #[test]
    fn test_punctuation_density() {
        assert!(close(punctuation_density("Hi, you.").unwrap(), 0.25));
        assert!(punctuation_density("").is_err());
    }

    #[test]
    fn test_stopword_ratio_custom_set() {
        let stopwords = StopwordSet::from_words(["the", "and"]);
        let ratio = stopword_ratio("The cat and the dog.", &stopwords).unwrap();
        assert!(close(ratio, 0.6));
    }

    #[test]
    fn test_feature_compute_matches_free_function() {
        let tokens = TokenizedText::new(PEARL);
        let stopwords = StopwordSet::from_words(Vec::<String>::new());
        let value = Feature::HapaxRatio.compute(&tokens, &stopwords).unwrap();
        assert!(close(value, exactly_once_to_total(PEARL).unwrap()));
    }
}
