//! Type interaction records supplied by the catalog

use serde::{Deserialize, Serialize};

/// Damage relations for a single defensive type
///
/// Each set lists attacking types by name. The record is read-only for the
/// engine; it is produced by the catalog and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInteraction {
    /// The defensive type these relations describe
    pub name: String,

    /// Attacking types that deal double damage to this type
    #[serde(default)]
    pub double_damage_from: Vec<String>,

    /// Attacking types that deal half damage to this type
    #[serde(default)]
    pub half_damage_from: Vec<String>,

    /// Attacking types that deal no damage to this type
    #[serde(default)]
    pub no_damage_from: Vec<String>,
}

impl TypeInteraction {
    /// Create a record with empty relation sets
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the double-damage relation
    pub fn with_double_from(mut self, types: &[&str]) -> Self {
        self.double_damage_from = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Builder: set the half-damage relation
    pub fn with_half_from(mut self, types: &[&str]) -> Self {
        self.half_damage_from = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Builder: set the no-damage relation
    pub fn with_no_damage_from(mut self, types: &[&str]) -> Self {
        self.no_damage_from = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// True if all three relation sets are empty
    pub fn is_empty(&self) -> bool {
        self.double_damage_from.is_empty()
            && self.half_damage_from.is_empty()
            && self.no_damage_from.is_empty()
    }
}
