// Attribution driver: index the known samples, sign the mystery text, match.
//
// The corpus is loaded exactly once per call and dropped when the call
// returns. The weighting policy is an explicit input rather than a constant
// buried in the driver.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::corpus::scan::{read_text, CorpusIndexer, SkippedFile};
use crate::error::{AttributionError, Result};
use crate::scoring::distance::WeightVector;
use crate::scoring::matcher::{rank_candidates, Match};
use crate::signature::{Signature, SignatureBuilder, SignatureLayout};
use crate::text::stopwords::StopwordSet;

/// Everything that shapes one attribution run.
#[derive(Debug, Clone)]
pub struct AttributionSettings {
    pub layout: SignatureLayout,
    pub weights: WeightVector,
    /// Custom stopwords for the extended layout (English when unset)
    pub stopwords: Option<StopwordSet>,
    /// Compute corpus signatures on the rayon pool
    pub parallel: bool,
    /// Show an indexing progress bar on stderr
    pub show_progress: bool,
}

impl AttributionSettings {
    /// Settings for `layout` with its default weighting policy.
    pub fn new(layout: SignatureLayout) -> Self {
        Self {
            layout,
            weights: WeightVector::default_for(layout),
            stopwords: None,
            parallel: false,
            show_progress: false,
        }
    }

    /// Replace the weighting policy. The vector must have one weight per
    /// layout dimension.
    pub fn with_weights(mut self, weights: WeightVector) -> Result<Self> {
        check_weights(self.layout, &weights)?;
        self.weights = weights;
        Ok(self)
    }

    pub fn signature_builder(&self) -> SignatureBuilder {
        let builder = SignatureBuilder::new(self.layout);
        match &self.stopwords {
            Some(stopwords) => builder.with_stopwords(stopwords.clone()),
            None => builder,
        }
    }
}

impl Default for AttributionSettings {
    fn default() -> Self {
        Self::new(SignatureLayout::Basic)
    }
}

/// Outcome of one attribution run.
#[derive(Debug, Clone, Serialize)]
pub struct Attribution {
    /// Closest known sample
    pub best_match: Match,
    pub mystery_signature: Signature,
    pub match_signature: Signature,
    /// All known samples, closest first
    pub ranked: Vec<Match>,
    /// Known-sample files left out of the index
    pub skipped: Vec<SkippedFile>,
    pub layout: SignatureLayout,
    pub weights: WeightVector,
}

/// Attribute the text at `mystery_path` to the closest sample in `known_dir`.
pub fn attribute(
    mystery_path: &Path,
    known_dir: &Path,
    settings: &AttributionSettings,
) -> Result<Attribution> {
    check_weights(settings.layout, &settings.weights)?;
    let builder = settings.signature_builder();

    info!(dir = %known_dir.display(), "Analyzing known samples");
    let scan = CorpusIndexer::new(builder.clone())
        .parallel(settings.parallel)
        .show_progress(settings.show_progress)
        .scan(known_dir)?;
    if scan.index.is_empty() {
        return Err(AttributionError::EmptyCorpus {
            dir: Some(known_dir.to_path_buf()),
        });
    }
    info!(samples = scan.index.len(), "Found known author samples");

    info!(file = %mystery_path.display(), "Processing mystery file");
    let text = read_text(mystery_path)?;
    let mystery_signature = builder.build(&text)?;
    info!(signature = %mystery_signature, "Mystery text signature");

    let ranked = rank_candidates(&scan.index, &mystery_signature, &settings.weights)?;
    let best_match = ranked
        .first()
        .cloned()
        .ok_or(AttributionError::EmptyCorpus { dir: None })?;
    let match_signature = scan
        .index
        .get(&best_match.identifier)
        .cloned()
        .ok_or(AttributionError::EmptyCorpus { dir: None })?;
    info!(
        best_match = %best_match.identifier,
        score = best_match.score,
        "Best match"
    );

    Ok(Attribution {
        best_match,
        mystery_signature,
        match_signature,
        ranked,
        skipped: scan.skipped,
        layout: settings.layout,
        weights: settings.weights.clone(),
    })
}

/// Identifier of the known sample closest to the mystery text, using the
/// basic layout and default weights.
pub fn process_data(mystery_path: &Path, known_dir: &Path) -> Result<String> {
    attribute(mystery_path, known_dir, &AttributionSettings::default())
        .map(|attribution| attribution.best_match.identifier)
}

fn check_weights(layout: SignatureLayout, weights: &WeightVector) -> Result<()> {
    if weights.len() != layout.len() {
        return Err(AttributionError::DimensionMismatch {
            argument: "weights",
            expected: layout.len(),
            actual: weights.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_settings_reject_wrong_weight_count() {
        let weights = WeightVector::new(vec![1.0; 5]).unwrap();
        let err = AttributionSettings::new(SignatureLayout::Extended)
            .with_weights(weights)
            .unwrap_err();
        assert!(matches!(
            err,
            AttributionError::DimensionMismatch {
                argument: "weights",
                expected: 7,
                actual: 5
            }
        ));
    }

    #[test]
    fn test_process_data_picks_closest() {
        let dir = tempfile::tempdir().unwrap();
        let known = dir.path().join("known");
        fs::create_dir(&known).unwrap();
        fs::write(
            known.join("author1.txt"),
            "A pearl! Pearl! Lustrous pearl! Rare. What a nice find.",
        )
        .unwrap();
        fs::write(known.join("author2.txt"), "Lustrous pearl, Rare, What a nice find.").unwrap();
        let mystery = dir.path().join("mystery.txt");
        fs::write(&mystery, "Lustrous pearl, Rare, What a nice find.").unwrap();

        assert_eq!(process_data(&mystery, &known).unwrap(), "author2.txt");
    }
}
