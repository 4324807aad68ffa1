//! Defensive analysis reports
//!
//! Profiles for single entities and ad-hoc type sets, team reports built on
//! the cancellation model, and side-by-side comparisons.

use crate::error::RecommendError;
use crate::resolve::multipliers_for;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use typecover_catalog::Catalog;
use typecover_domain::{
    net_outcome, score_breakdown, BaseStats, EntityRecord, MultiplierMap, ScoreBreakdown,
};

/// Defensive profile of one entity or type set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProfile {
    /// Entity name, or the type set joined with `/` for ad-hoc profiles
    pub name: String,
    /// Defensive types
    pub types: Vec<String>,
    /// Sprite URL, if known
    pub sprite: Option<String>,
    /// Base stats; absent for ad-hoc type sets
    pub stats: Option<BaseStats>,
    /// Combined multiplier map
    pub multipliers: MultiplierMap,
    /// How the score was reached
    pub breakdown: ScoreBreakdown,
    /// Attacking types dealing more than neutral damage
    pub weaknesses: Vec<String>,
    /// Attacking types dealing reduced damage
    pub resistances: Vec<String>,
    /// Attacking types dealing no damage
    pub immunities: Vec<String>,
}

impl EntityProfile {
    fn build(
        name: String,
        types: Vec<String>,
        sprite: Option<String>,
        stats: Option<BaseStats>,
        multipliers: MultiplierMap,
    ) -> Self {
        Self {
            weaknesses: owned(multipliers.weaknesses()),
            resistances: owned(multipliers.resistances()),
            immunities: owned(multipliers.immunities()),
            breakdown: score_breakdown(&multipliers),
            name,
            types,
            sprite,
            stats,
            multipliers,
        }
    }

    /// Final defensive score
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }
}

/// Defensive report for a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    /// Member profiles in input order
    pub members: Vec<EntityProfile>,
    /// Net per-attacking-type outcome after cancellation
    pub net: MultiplierMap,
    /// Score of the net outcome
    pub breakdown: ScoreBreakdown,
    /// Attacking types the team as a whole is still weak to
    pub uncovered: Vec<String>,
}

impl TeamReport {
    /// Team defensive score
    pub fn score(&self) -> f64 {
        self.breakdown.score
    }
}

/// Side-by-side comparison of two profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Left-hand profile
    pub left: EntityProfile,
    /// Right-hand profile
    pub right: EntityProfile,
    /// Left score minus right score
    pub score_delta: f64,
    /// Weaknesses of the right entity that the left one resists or blocks
    pub left_covers_right: Vec<String>,
    /// Weaknesses of the left entity that the right one resists or blocks
    pub right_covers_left: Vec<String>,
}

fn owned<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(str::to_string).collect()
}

fn covered_weaknesses(coverer: &EntityProfile, weak: &EntityProfile) -> Vec<String> {
    weak.weaknesses
        .iter()
        .filter(|t| coverer.multipliers.covers(t))
        .cloned()
        .collect()
}

/// Builds analysis reports from catalog data
pub struct Analyzer<C> {
    catalog: Arc<C>,
}

impl<C: Catalog> Analyzer<C> {
    /// Create an analyzer over a catalog
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    /// Profile a named entity
    pub async fn analyze(&self, name: &str) -> Result<EntityProfile, RecommendError> {
        let entity = self.catalog.entity(name).await?;
        self.profile(entity).await
    }

    /// Profile an already fetched entity
    pub async fn profile(&self, entity: EntityRecord) -> Result<EntityProfile, RecommendError> {
        if entity.types.is_empty() {
            return Err(RecommendError::NoTypes(entity.name));
        }
        let multipliers = multipliers_for(self.catalog.as_ref(), &entity.types).await?;
        Ok(EntityProfile::build(
            entity.name,
            entity.types,
            entity.sprite,
            Some(entity.stats),
            multipliers,
        ))
    }

    /// Profile an ad-hoc set of defensive types
    pub async fn analyze_types(&self, types: &[String]) -> Result<EntityProfile, RecommendError> {
        if types.is_empty() {
            return Err(RecommendError::NoTypes(String::new()));
        }
        let multipliers = multipliers_for(self.catalog.as_ref(), types).await?;
        Ok(EntityProfile::build(
            types.join("/"),
            types.to_vec(),
            None,
            None,
            multipliers,
        ))
    }

    /// Profile every member and reconcile their outcomes
    pub async fn analyze_team(&self, names: &[String]) -> Result<TeamReport, RecommendError> {
        info!("Analyzing team of {}", names.len());
        let members = try_join_all(names.iter().map(|name| self.analyze(name))).await?;
        let maps: Vec<MultiplierMap> = members.iter().map(|m| m.multipliers.clone()).collect();
        let net = net_outcome(&maps);
        let uncovered = owned(net.weaknesses());
        Ok(TeamReport {
            breakdown: score_breakdown(&net),
            members,
            net,
            uncovered,
        })
    }

    /// Compare two named entities
    pub async fn compare(&self, left: &str, right: &str) -> Result<Comparison, RecommendError> {
        let (left, right) = futures::try_join!(self.analyze(left), self.analyze(right))?;
        Ok(Comparison {
            score_delta: left.score() - right.score(),
            left_covers_right: covered_weaknesses(&left, &right),
            right_covers_left: covered_weaknesses(&right, &left),
            left,
            right,
        })
    }
}
