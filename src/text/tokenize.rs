// Tokenizer and normalizer.
//
// Words come from whitespace splitting followed by `clean_word`. Sentences and
// phrases both go through `split_string`, so boundary, trim and drop-empty
// behave identically at both granularities.

/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: &str = ".?!";

/// Characters that separate phrases inside a sentence.
pub const PHRASE_SEPARATORS: &str = ",;:";

/// Lowercase a word and strip ASCII punctuation from both ends.
///
/// Interior punctuation is kept, so hyphenated words and contractions survive:
/// `"card-board"` stays `"card-board"`, `"Pearl!"` becomes `"pearl"`.
pub fn clean_word(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

/// Split `text` on any character in `separators`.
///
/// Each segment is trimmed of surrounding whitespace and empty segments are
/// dropped. Order is preserved.
pub fn split_string<'a>(text: &'a str, separators: &str) -> Vec<&'a str> {
    text.split(|c: char| separators.contains(c))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Sentences of `text`, split on `.`, `?` and `!`.
pub fn get_sentences(text: &str) -> Vec<&str> {
    split_string(text, SENTENCE_TERMINATORS)
}

/// Phrases of a sentence, split on `,`, `;` and `:`.
pub fn get_phrases(sentence: &str) -> Vec<&str> {
    split_string(sentence, PHRASE_SEPARATORS)
}

/// Whitespace-separated words of `text`, cleaned, with empties removed.
pub fn normalized_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(clean_word)
        .filter(|word| !word.is_empty())
}
