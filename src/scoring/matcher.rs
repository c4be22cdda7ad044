// Nearest-neighbor search over the corpus index.
//
// Full linear scan. Ties go to the first identifier in lexicographic order,
// which is the index's iteration order.

use serde::Serialize;
use tracing::debug;

use super::distance::{score, WeightVector};
use crate::corpus::index::CorpusIndex;
use crate::error::{AttributionError, Result};
use crate::signature::Signature;

/// A corpus entry and its distance to the unknown signature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub identifier: String,
    pub score: f64,
}

/// Every corpus entry scored against `unknown`, closest first.
///
/// Equal scores keep identifier order.
pub fn rank_candidates(
    index: &CorpusIndex,
    unknown: &Signature,
    weights: &WeightVector,
) -> Result<Vec<Match>> {
    if index.is_empty() {
        return Err(AttributionError::EmptyCorpus { dir: None });
    }

    let mut ranked = index
        .iter()
        .map(|(identifier, known)| -> Result<Match> {
            let score = score(known, unknown, weights)?;
            debug!(identifier = identifier, score = score, "Scored candidate");
            Ok(Match {
                identifier: identifier.to_string(),
                score,
            })
        })
        .collect::<Result<Vec<Match>>>()?;

    // Stable sort, so ties stay in identifier order
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    Ok(ranked)
}

/// The closest corpus entry to `unknown`.
pub fn best_match(index: &CorpusIndex, unknown: &Signature, weights: &WeightVector) -> Result<Match> {
    let mut best: Option<Match> = None;
    for (identifier, known) in index.iter() {
        let score = score(known, unknown, weights)?;
        debug!(identifier = identifier, score = score, "Scored candidate");
        if best.as_ref().map_or(true, |b| score < b.score) {
            best = Some(Match {
                identifier: identifier.to_string(),
                score,
            });
        }
    }
    best.ok_or(AttributionError::EmptyCorpus { dir: None })
}

/// Identifier of the closest corpus entry to `unknown`.
pub fn lowest_score(index: &CorpusIndex, unknown: &Signature, weights: &WeightVector) -> Result<String> {
    best_match(index, unknown, weights).map(|m| m.identifier)
}
