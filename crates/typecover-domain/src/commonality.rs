//! Commonality weights for attacking types
//!
//! A hand-tuned estimate of how often each attacking type shows up in
//! practice. The values are used only by the scoring formulas and are kept
//! verbatim; they are not derived from any data set.

/// Weight used for attacking types missing from the table
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Every attacking type the engine knows about, with its commonality weight
///
/// This list is also the universe of attacking types for team reconciliation.
pub const ATTACKING_TYPES: [(&str, f64); 18] = [
    ("normal", 1.5),
    ("fire", 2.0),
    ("water", 2.5),
    ("electric", 2.0),
    ("grass", 1.0),
    ("ice", 2.0),
    ("fighting", 2.0),
    ("poison", 1.0),
    ("ground", 2.5),
    ("flying", 1.5),
    ("psychic", 1.5),
    ("bug", 0.8),
    ("rock", 1.5),
    ("ghost", 1.5),
    ("dragon", 1.5),
    ("dark", 1.5),
    ("steel", 1.0),
    ("fairy", 2.0),
];

/// The seven attacking types common enough to earn an avoidance bonus
pub const COMMON_ATTACKING_TYPES: [&str; 7] = [
    "water", "ground", "fire", "electric", "ice", "fighting", "fairy",
];

/// Commonality weight for an attacking type
pub fn weight(attacking_type: &str) -> f64 {
    ATTACKING_TYPES
        .iter()
        .find(|(name, _)| *name == attacking_type)
        .map_or(DEFAULT_WEIGHT, |(_, w)| *w)
}

/// Whether an attacking type belongs to the common seven
pub fn is_common(attacking_type: &str) -> bool {
    COMMON_ATTACKING_TYPES.contains(&attacking_type)
}

/// Iterate over the names of all known attacking types
pub fn attacking_type_names() -> impl Iterator<Item = &'static str> {
    ATTACKING_TYPES.iter().map(|(name, _)| *name)
}
