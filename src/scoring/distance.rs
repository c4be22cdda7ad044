// Weighted absolute-difference distance between two signatures.
//
//   score = sum(|a[i] - b[i]| * w[i])
//
// No normalization is applied. Weight magnitudes are the caller's calibration.

use serde::{Deserialize, Serialize};

use crate::error::{AttributionError, Result};
use crate::signature::{Signature, SignatureLayout};

/// Default weighting policy for the basic layout. Lexical diversity and hapax
/// ratio dominate; sentence structure contributes little.
pub const AUTHORSHIP_WEIGHTS: [f64; 5] = [11.0, 33.0, 50.0, 0.4, 4.0];

/// Basic policy plus punctuation density (2) and stopword ratio (3).
pub const EXTENDED_AUTHORSHIP_WEIGHTS: [f64; 7] = [11.0, 33.0, 50.0, 0.4, 4.0, 2.0, 3.0];

/// Per-dimension importance. Every weight is finite and non-negative,
/// including weights read back from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct WeightVector {
    values: Vec<f64>,
}

impl WeightVector {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(AttributionError::InvalidWeight { index, value });
        }
        Ok(Self { values })
    }

    /// The built-in policy for `layout`.
    pub fn default_for(layout: SignatureLayout) -> Self {
        let values = match layout {
            SignatureLayout::Basic => AUTHORSHIP_WEIGHTS.to_vec(),
            SignatureLayout::Extended => EXTENDED_AUTHORSHIP_WEIGHTS.to_vec(),
        };
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = AttributionError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.values
    }
}

/// Weighted distance between `sig_a` and `sig_b`. Lower means more similar.
///
/// Two signatures that agree with each other but not with the weights blame
/// `weights`. Otherwise the weight vector fixes the expected dimension count
/// and the first signature of any other length is named.
pub fn score(sig_a: &Signature, sig_b: &Signature, weights: &WeightVector) -> Result<f64> {
    if sig_a.len() == sig_b.len() && sig_a.len() != weights.len() {
        return Err(AttributionError::DimensionMismatch {
            argument: "weights",
            expected: sig_a.len(),
            actual: weights.len(),
        });
    }

    let expected = weights.len();
    for (argument, sig) in [("signature_a", sig_a), ("signature_b", sig_b)] {
        if sig.len() != expected {
            return Err(AttributionError::DimensionMismatch {
                argument,
                expected,
                actual: sig.len(),
            });
        }
    }

    Ok(sig_a
        .values()
        .iter()
        .zip(sig_b.values())
        .zip(weights.values())
        .map(|((a, b), w)| (a - b).abs() * w)
        .sum())
}
