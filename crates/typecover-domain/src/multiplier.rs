//! Multiplier map module
//!
//! A multiplier map records how much damage each attacking type deals to one
//! entity (or, after reconciliation, to a whole team). Neutral entries are
//! never stored, so an absent key always reads as 1.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multiplier for an immunity
pub const IMMUNE: f64 = 0.0;

/// Multiplier for a neutral interaction
pub const NEUTRAL: f64 = 1.0;

/// Exact comparison for multipliers.
///
/// Multipliers are products of 2 and 0.5, which are exact in binary floating
/// point, so an epsilon comparison only guards against hand-written inputs.
pub fn same(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// Per-attacking-type damage multipliers
///
/// Immutable once built: merging maps always produces a new map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiplierMap(BTreeMap<String, f64>);

impl MultiplierMap {
    /// Create an empty (all-neutral) map
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Multiplier for an attacking type, 1.0 if absent
    pub fn get(&self, attacking_type: &str) -> f64 {
        self.0.get(attacking_type).copied().unwrap_or(NEUTRAL)
    }

    /// Whether a non-neutral entry exists for the attacking type
    pub fn contains(&self, attacking_type: &str) -> bool {
        self.0.contains_key(attacking_type)
    }

    /// Iterate over non-neutral entries in attacking-type order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(t, m)| (t.as_str(), *m))
    }

    /// Number of non-neutral entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if every attacking type is neutral
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attacking types dealing more than neutral damage
    pub fn weaknesses(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, m)| *m > NEUTRAL).map(|(t, _)| t)
    }

    /// Attacking types dealing reduced but non-zero damage
    pub fn resistances(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, m)| *m > IMMUNE && *m < NEUTRAL)
            .map(|(t, _)| t)
    }

    /// Attacking types dealing no damage
    pub fn immunities(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, m)| same(*m, IMMUNE)).map(|(t, _)| t)
    }

    /// Number of attacking types this map is weak to
    pub fn weakness_count(&self) -> usize {
        self.weaknesses().count()
    }

    /// Whether the attacking type is resisted or blocked entirely
    pub fn covers(&self, attacking_type: &str) -> bool {
        self.get(attacking_type) < NEUTRAL
    }

    /// Whether the attacking type deals no damage
    pub fn is_immune_to(&self, attacking_type: &str) -> bool {
        self.0
            .get(attacking_type)
            .map_or(false, |m| same(*m, IMMUNE))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MultiplierMap {
    /// Collect entries, dropping neutral ones; later duplicates win
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut entries = BTreeMap::new();
        for (attacking_type, multiplier) in iter {
            let attacking_type = attacking_type.into();
            if same(multiplier, NEUTRAL) {
                entries.remove(&attacking_type);
            } else {
                entries.insert(attacking_type, multiplier);
            }
        }
        Self(entries)
    }
}
