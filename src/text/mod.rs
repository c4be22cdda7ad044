// Text normalization: word cleaning, sentence and phrase splitting, stopwords.

pub mod stopwords;
pub mod tokenize;
