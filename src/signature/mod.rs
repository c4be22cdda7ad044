// Signature: the fixed-order feature vector describing one text's style.
//
// The layout decides which features appear and in what order. Every signature
// compared against another must come from the same layout.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Result;
use crate::features::{Feature, TokenizedText};
use crate::text::stopwords::StopwordSet;

const BASIC_FEATURES: &[Feature] = &[
    Feature::AverageWordLength,
    Feature::LexicalDiversity,
    Feature::HapaxRatio,
    Feature::AverageSentenceLength,
    Feature::SentenceComplexity,
];

const EXTENDED_FEATURES: &[Feature] = &[
    Feature::AverageWordLength,
    Feature::LexicalDiversity,
    Feature::HapaxRatio,
    Feature::AverageSentenceLength,
    Feature::SentenceComplexity,
    Feature::PunctuationDensity,
    Feature::StopwordRatio,
];

/// Which set of features a signature contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureLayout {
    /// Five dimensions: word length, diversity, hapax, sentence length, complexity
    #[default]
    Basic,
    /// Basic plus punctuation density and stopword ratio
    Extended,
}

impl SignatureLayout {
    pub fn features(self) -> &'static [Feature] {
        match self {
            SignatureLayout::Basic => BASIC_FEATURES,
            SignatureLayout::Extended => EXTENDED_FEATURES,
        }
    }

    pub fn len(self) -> usize {
        self.features().len()
    }
}

impl fmt::Display for SignatureLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureLayout::Basic => f.write_str("basic"),
            SignatureLayout::Extended => f.write_str("extended"),
        }
    }
}

impl FromStr for SignatureLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SignatureLayout::Basic),
            "extended" => Ok(SignatureLayout::Extended),
            other => Err(format!(
                "unknown signature layout '{other}' (expected 'basic' or 'extended')"
            )),
        }
    }
}

/// A computed signature. Never partially filled: either every feature of the
/// layout succeeded or no signature exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Signature {
    values: Vec<f64>,
}

impl Signature {
    pub fn new(values: Vec<f64>) -> Self {
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

impl From<Vec<f64>> for Signature {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for Signature {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl fmt::Display for Signature {
    /// Values rounded to three decimals, e.g. `[4.100, 0.700, 0.500]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values.iter().map(|v| format!("{v:.3}")).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Builds signatures for a fixed layout.
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    layout: SignatureLayout,
    stopwords: StopwordSet,
}

impl SignatureBuilder {
    /// Builder for `layout`. The extended layout loads the English stopword
    /// list; the basic layout never consults stopwords.
    pub fn new(layout: SignatureLayout) -> Self {
        let stopwords = match layout {
            SignatureLayout::Extended => StopwordSet::english(),
            SignatureLayout::Basic => StopwordSet::from_words(Vec::<String>::new()),
        };
        Self { layout, stopwords }
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn layout(&self) -> SignatureLayout {
        self.layout
    }

    /// Compute every feature of the layout, in order, from one tokenization.
    pub fn build(&self, text: &str) -> Result<Signature> {
        let tokens = TokenizedText::new(text);
        let values = self
            .layout
            .features()
            .iter()
            .map(|feature| feature.compute(&tokens, &self.stopwords))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Signature::new(values))
    }
}

impl Default for SignatureBuilder {
    fn default() -> Self {
        Self::new(SignatureLayout::Basic)
    }
}

/// Five-dimension signature of `text`.
pub fn make_signature(text: &str) -> Result<Signature> {
    SignatureBuilder::default().build(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AttributionError, EmptyKind};

    fn assert_close(actual: &Signature, expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.values().iter().zip(expected).enumerate() {
            assert!((a - e).abs() < 1e-9, "dimension {i}: got {a}, expected {e}");
        }
    }

    #[test]
    fn test_make_signature_pearl() {
        let sig = make_signature("A pearl! Pearl! Lustrous pearl! Rare. What a nice find.").unwrap();
        assert_close(&sig, &[4.1, 0.7, 0.5, 2.0, 1.0]);
    }

    #[test]
    fn test_make_signature_short_text() {
        let sig = make_signature("Hello world. How are you?").unwrap();
        assert_close(&sig, &[3.8, 1.0, 1.0, 2.5, 1.0]);
    }

    #[test]
    fn test_extended_layout_appends_two_dimensions() {
        let builder = SignatureBuilder::new(SignatureLayout::Extended)
            .with_stopwords(StopwordSet::from_words(["a", "what"]));
        let sig = builder
            .build("A pearl! Pearl! Lustrous pearl! Rare. What a nice find.")
            .unwrap();
        assert_eq!(builder.layout(), SignatureLayout::Extended);
        assert_eq!(sig.len(), builder.layout().len());
        assert_close(
            &Signature::new(sig.values()[..5].to_vec()),
            &[4.1, 0.7, 0.5, 2.0, 1.0],
        );
        assert!((sig.values()[6] - 0.3).abs() < 1e-9);
        assert!(sig.values()[5] > 0.0 && sig.values()[5] < 1.0);
    }

    #[test]
    fn test_no_partial_signature() {
        let err = make_signature("?!").unwrap_err();
        assert!(matches!(
            err,
            AttributionError::EmptyInput {
                kind: EmptyKind::Words
            }
        ));
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("Extended".parse::<SignatureLayout>().unwrap(), SignatureLayout::Extended);
        assert_eq!(" basic ".parse::<SignatureLayout>().unwrap(), SignatureLayout::Basic);
        assert!("full".parse::<SignatureLayout>().is_err());
        assert_eq!(SignatureLayout::Extended.len(), 7);
    }

    #[test]
    fn test_display_rounds() {
        let sig = Signature::from([4.1, 1.0 / 3.0]);
        assert_eq!(sig.to_string(), "[4.100, 0.333]");
    }
}
