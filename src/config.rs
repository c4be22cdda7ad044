use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::pipeline::attribution::AttributionSettings;
use crate::scoring::distance::WeightVector;
use crate::signature::SignatureLayout;

/// Where known-author samples live when nothing else is configured.
pub const DEFAULT_KNOWN_DIR: &str = "data/known_authors";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags
/// override anything set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory of known-author samples (PENMARK_KNOWN_DIR)
    pub known_dir: PathBuf,
    /// Signature layout (PENMARK_LAYOUT, "basic" or "extended")
    pub layout: SignatureLayout,
    /// Weighting policy (PENMARK_WEIGHTS). `None` means the layout's default.
    pub weights: Option<WeightVector>,
    /// Index the corpus on all cores (PENMARK_PARALLEL)
    pub parallel: bool,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let layout = match lookup("PENMARK_LAYOUT") {
            Some(raw) => raw
                .parse::<SignatureLayout>()
                .map_err(anyhow::Error::msg)
                .context("Invalid PENMARK_LAYOUT")?,
            None => SignatureLayout::Basic,
        };

        let weights = lookup("PENMARK_WEIGHTS")
            .map(|raw| parse_weights(&raw).context("Invalid PENMARK_WEIGHTS"))
            .transpose()?;

        Ok(Self {
            known_dir: lookup("PENMARK_KNOWN_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_KNOWN_DIR)),
            layout,
            weights,
            parallel: lookup("PENMARK_PARALLEL").is_some_and(|raw| parse_flag(&raw)),
        })
    }

    /// Check that the known-authors directory exists and is a directory.
    /// Call this before prompting the user for anything.
    pub fn require_known_dir(&self) -> Result<()> {
        require_dir(&self.known_dir)
    }

    /// Attribution settings for this configuration.
    ///
    /// Custom weights must have one entry per dimension of the layout.
    pub fn settings(&self) -> Result<AttributionSettings> {
        let settings = AttributionSettings::new(self.layout);
        let mut settings = match &self.weights {
            Some(weights) => settings.with_weights(weights.clone()).with_context(|| {
                format!(
                    "PENMARK_WEIGHTS has {} values but the {} layout needs {}",
                    weights.len(),
                    self.layout,
                    self.layout.len()
                )
            })?,
            None => settings,
        };
        settings.parallel = self.parallel;
        Ok(settings)
    }
}

/// Parse a comma-separated weight list such as `11, 33, 50, 0.4, 4`.
pub fn parse_weights(raw: &str) -> Result<WeightVector> {
    let values = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .with_context(|| format!("'{part}' is not a number"))
        })
        .collect::<Result<Vec<f64>>>()?;
    if values.is_empty() {
        anyhow::bail!("weight list is empty");
    }
    Ok(WeightVector::new(values)?)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn require_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Directory '{}' does not exist.\n\
             Set PENMARK_KNOWN_DIR or pass --known-dir to point at your known-author samples.",
            dir.display()
        );
    }
    if !dir.is_dir() {
        anyhow::bail!("'{}' is not a directory.", dir.display());
    }
    Ok(())
}
