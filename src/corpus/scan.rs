// Corpus indexer: signatures for every regular file in a known-authors directory.
//
// Only the directory itself is fatal. A member file that cannot be read,
// is not UTF-8, or has no words to measure is skipped, logged, and recorded
// in the scan's skip list. So is a directory entry that cannot be listed,
// and a file whose lossily decoded name collides with an earlier one.
//
// Signatures are independent, so they can be computed on the rayon pool. The
// index is assembled only after every file has been processed.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::index::CorpusIndex;
use crate::error::{AttributionError, Result};
use crate::signature::{Signature, SignatureBuilder};

/// Why a corpus file was left out of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Permission or other I/O failure while reading
    Unreadable,
    /// Contents are not valid UTF-8
    Undecodable,
    /// No words or sentences to measure
    EmptyText,
    /// Name is not valid UTF-8 and decodes to an identifier already in use
    DuplicateName,
}

/// A file that did not make it into the index.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub identifier: String,
    pub reason: SkipReason,
    /// Human-readable description of the underlying failure
    pub detail: String,
}

/// Result of scanning a directory: the index plus everything that was skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusScan {
    pub index: CorpusIndex,
    pub skipped: Vec<SkippedFile>,
}

/// Read a whole file as UTF-8 text.
///
/// A missing file is `MissingFile`, other I/O failures are `Unreadable`, and
/// invalid UTF-8 is `Undecodable`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => AttributionError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => AttributionError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    String::from_utf8(bytes).map_err(|source| AttributionError::Undecodable {
        path: path.to_path_buf(),
        source,
    })
}

/// Scans a known-authors directory into a `CorpusScan`.
#[derive(Debug, Clone)]
pub struct CorpusIndexer {
    builder: SignatureBuilder,
    parallel: bool,
    show_progress: bool,
}

impl CorpusIndexer {
    pub fn new(builder: SignatureBuilder) -> Self {
        Self {
            builder,
            parallel: false,
            show_progress: false,
        }
    }

    /// Compute signatures on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Draw a progress bar on stderr while signatures are computed.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn scan(&self, dir: &Path) -> Result<CorpusScan> {
        let (files, mut skipped) = list_files(dir)?;
        info!(
            dir = %dir.display(),
            files = files.len(),
            layout = %self.builder.layout(),
            parallel = self.parallel,
            "Indexing known samples"
        );

        let pb = if self.show_progress {
            let pb = ProgressBar::new(files.len() as u64);
            if let Ok(style) =
                ProgressStyle::default_bar().template("  Samples [{bar:30}] {pos}/{len} ({eta})")
            {
                pb.set_style(style);
            }
            pb
        } else {
            ProgressBar::hidden()
        };

        let compute = |(identifier, path): &(String, PathBuf)| {
            let outcome = read_text(path).and_then(|text| self.builder.build(&text));
            pb.inc(1);
            (identifier.clone(), outcome)
        };

        let outcomes: Vec<(String, Result<Signature>)> = if self.parallel {
            files.par_iter().map(compute).collect()
        } else {
            files.iter().map(compute).collect()
        };
        pb.finish_and_clear();

        let mut entries = Vec::with_capacity(outcomes.len());
        for (identifier, outcome) in outcomes {
            match outcome {
                Ok(signature) => entries.push((identifier, signature)),
                Err(err) => skipped.push(skipped_file(identifier, &err)),
            }
        }
        for skip in &skipped {
            warn!(
                identifier = %skip.identifier,
                reason = ?skip.reason,
                "Could not process file: {}",
                skip.detail
            );
        }

        let index: CorpusIndex = entries.into_iter().collect();
        info!(
            indexed = index.len(),
            skipped = skipped.len(),
            "Corpus index built"
        );
        Ok(CorpusScan { index, skipped })
    }
}

impl Default for CorpusIndexer {
    fn default() -> Self {
        Self::new(SignatureBuilder::default())
    }
}

/// Basic-layout scan of `known_dir`, sequential, no progress bar.
pub fn get_all_signatures(known_dir: &Path) -> Result<CorpusScan> {
    CorpusIndexer::default().scan(known_dir)
}

/// Identifier recorded for a directory entry that could not be listed.
const UNLISTED_ENTRY: &str = "<unlisted entry>";

/// Regular files directly inside `dir`, sorted by identifier, plus the
/// entries that cannot be indexed under a name of their own.
fn list_files(dir: &Path) -> Result<(Vec<(String, PathBuf)>, Vec<SkippedFile>)> {
    let entries = fs::read_dir(dir).map_err(|source| AttributionError::CorpusDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(collect_files(entries.map(|entry| entry.map(|e| e.path()))))
}

fn collect_files<I>(entries: I) -> (Vec<(String, PathBuf)>, Vec<SkippedFile>)
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                skipped.push(SkippedFile {
                    identifier: UNLISTED_ENTRY.to_string(),
                    reason: SkipReason::Unreadable,
                    detail: format!("Cannot list directory entry: {err}"),
                });
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name() {
            files.push((name.to_string_lossy().into_owned(), path));
        }
    }

    // Raw path order breaks ties between names that decode identically
    files.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    let mut unique: Vec<(String, PathBuf)> = Vec::with_capacity(files.len());
    for (identifier, path) in files {
        match unique.last() {
            Some((kept, kept_path)) if *kept == identifier => skipped.push(SkippedFile {
                detail: format!(
                    "File name {:?} is not valid UTF-8 and reads the same as {:?}",
                    raw_name(&path),
                    raw_name(kept_path)
                ),
                identifier,
                reason: SkipReason::DuplicateName,
            }),
            _ => unique.push((identifier, path)),
        }
    }
    (unique, skipped)
}

fn raw_name(path: &Path) -> &OsStr {
    path.file_name().unwrap_or(path.as_os_str())
}

fn skipped_file(identifier: String, err: &AttributionError) -> SkippedFile {
    let reason = match err {
        AttributionError::Undecodable { .. } => SkipReason::Undecodable,
        AttributionError::EmptyInput { .. } => SkipReason::EmptyText,
        _ => SkipReason::Unreadable,
    };
    SkippedFile {
        identifier,
        reason,
        detail: err.to_string(),
    }
}
