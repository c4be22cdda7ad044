// Error taxonomy for the attribution pipeline.
//
// Every failure the library can produce has its own variant so callers (the
// CLI, tests) can match on the kind instead of parsing messages.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

/// What a feature extractor ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// No non-empty normalized words
    Words,
    /// No non-empty sentences after splitting on terminators
    Sentences,
    /// Zero characters in the raw text
    Characters,
}

impl fmt::Display for EmptyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmptyKind::Words => "valid words",
            EmptyKind::Sentences => "sentences",
            EmptyKind::Characters => "characters",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AttributionError {
    /// A feature would divide by zero.
    #[error("No {kind} found in text")]
    EmptyInput { kind: EmptyKind },

    /// Signature or weight vectors of different lengths were compared.
    #[error("{argument} must have exactly {expected} elements, got {actual}")]
    DimensionMismatch {
        argument: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A weight was negative or not a finite number.
    #[error("weight {index} must be a non-negative finite number, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    /// No known signatures to match against. `dir` is set when the corpus
    /// came from a directory scan.
    #[error("{}", empty_corpus_message(.dir.as_deref()))]
    EmptyCorpus { dir: Option<PathBuf> },

    /// The known-authors directory itself could not be listed.
    #[error("Cannot read directory {}: {source}", .path.display())]
    CorpusDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The mystery file does not exist.
    #[error("Mystery file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    /// The file exists but reading it failed (permissions, I/O).
    #[error("Cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid UTF-8 text.
    #[error("Cannot read {} as text: {source}", .path.display())]
    Undecodable {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
}

fn empty_corpus_message(dir: Option<&Path>) -> String {
    match dir {
        Some(dir) => format!("No valid text files found in directory: {}", dir.display()),
        None => "Corpus index is empty".to_string(),
    }
}

/// Convenience Result type for the library.
pub type Result<T> = std::result::Result<T, AttributionError>;
