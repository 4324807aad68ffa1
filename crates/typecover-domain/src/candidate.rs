//! Recommendation results

use crate::MultiplierMap;
use serde::{Deserialize, Serialize};

/// The search pass that accepted a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPass {
    /// Covers at least one weakness nobody else covers yet
    NewCoverage,
    /// Covers some open weakness, possibly already covered
    AnyCoverage,
    /// Adds statistical variety; carries no coverage information
    Diversity,
}

impl SearchPass {
    /// Get the pass name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchPass::NewCoverage => "new-coverage",
            SearchPass::AnyCoverage => "any-coverage",
            SearchPass::Diversity => "diversity",
        }
    }
}

/// A recommended teammate
///
/// Created once when a search pass accepts it and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Final-form name
    pub name: String,
    /// Sprite URL of the final form
    pub sprite: Option<String>,
    /// Defensive types of the final form
    pub types: Vec<String>,
    /// Lineage the candidate belongs to
    pub lineage_id: String,
    /// Team weaknesses this candidate covers that were not covered before
    pub newly_covered: Vec<String>,
    /// Team weaknesses this candidate takes no damage from
    pub immune_to: Vec<String>,
    /// The candidate's own multiplier map
    pub multipliers: MultiplierMap,
    /// Number of attacking types the candidate is weak to
    pub weakness_count: usize,
    /// The candidate's individual defensive score
    pub individual_score: f64,
    /// Desirability score assigned by the accepting pass
    pub score: f64,
    /// Pass that accepted the candidate
    pub pass: SearchPass,
}
