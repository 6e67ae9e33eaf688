use std::collections::BTreeMap;

use crate::shape::classify::Element;

/// Stage that produced a mapping entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Equal normalized text.
    Text,
    /// Within a matched group pair.
    Cluster,
    /// Global greedy pass over the leftovers.
    Residual,
}

/// One source → target correspondence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MappingEntry {
    /// Source element id.
    pub source: String,
    /// Target element id.
    pub target: String,
    /// Stage that made the match.
    pub origin: MatchOrigin,
    /// Match cost of the pair.
    pub cost: f64,
}

/// Partial injective correspondence between source and target elements.
///
/// Insertions that would reuse either side are refused, so the mapping stays injective in both
/// directions no matter which stage adds to it.
#[derive(Clone, Debug, Default)]
pub struct ElementMapping {
    forward: BTreeMap<usize, usize>,
    backward: BTreeMap<usize, usize>,
    entries: Vec<MappingEntry>,
}

impl ElementMapping {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source → target`; returns `false` (and changes nothing) when either is taken.
    pub fn insert(
        &mut self,
        source: &Element,
        target: &Element,
        origin: MatchOrigin,
        cost: f64,
    ) -> bool {
        if self.forward.contains_key(&source.index) || self.backward.contains_key(&target.index) {
            return false;
        }
        self.forward.insert(source.index, target.index);
        self.backward.insert(target.index, source.index);
        self.entries.push(MappingEntry {
            source: source.id.clone(),
            target: target.id.clone(),
            origin,
            cost,
        });
        true
    }

    /// Target index mapped from `source`.
    pub fn target_of(&self, source: usize) -> Option<usize> {
        self.forward.get(&source).copied()
    }

    /// Source index mapped to `target`.
    pub fn source_of(&self, target: usize) -> Option<usize> {
        self.backward.get(&target).copied()
    }

    /// Whether `source` already has a counterpart.
    pub fn is_source_mapped(&self, source: usize) -> bool {
        self.forward.contains_key(&source)
    }

    /// Whether `target` already has a counterpart.
    pub fn is_target_mapped(&self, target: usize) -> bool {
        self.backward.contains_key(&target)
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is matched yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// `(source index, target index)` pairs in ascending source index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.forward.iter().map(|(&s, &t)| (s, t))
    }

    /// Number of entries produced by `origin`.
    pub fn count_by_origin(&self, origin: MatchOrigin) -> usize {
        self.entries.iter().filter(|e| e.origin == origin).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matching/mapping.rs"]
mod tests;
