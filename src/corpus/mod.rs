// Corpus: signatures of the known-author samples.

pub mod index;
pub mod scan;
