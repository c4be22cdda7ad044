// In-memory corpus index: identifier -> signature.
//
// Entries are kept in lexicographic identifier order. That order is what the
// matcher iterates, so ties resolve the same way on every platform.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::signature::Signature;

/// Known signatures keyed by sample identifier (the file name).
///
/// Built once per attribution run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CorpusIndex {
    entries: BTreeMap<String, Signature>,
}

impl CorpusIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&Signature> {
        self.entries.get(identifier)
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Signature)> {
        self.entries.iter().map(|(id, sig)| (id.as_str(), sig))
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for CorpusIndex
where
    K: Into<String>,
    V: Into<Signature>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(id, sig)| (id.into(), sig.into()))
                .collect(),
        }
    }
}
