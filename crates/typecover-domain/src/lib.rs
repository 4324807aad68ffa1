//! Typecover Domain Layer
//!
//! This crate contains the scoring model for defensive typing. It performs no
//! I/O and defines the data model shared by the catalog, recommender and CLI
//! crates.
//!
//! ## Key Concepts
//!
//! - **Type interaction**: which attacking types deal double, half or no damage
//!   to a single defensive type
//! - **Multiplier map**: the per-attacking-type damage multiplier of an entity
//!   with one or two defensive types
//! - **Defensive score**: a single 0-10 figure derived from a multiplier map
//! - **Net outcome**: a team's reconciled multiplier map after teammates'
//!   resistances cancel each other's weaknesses
//!
//! ## Architecture
//!
//! - Pure, synchronous functions only
//! - External lookups happen in `typecover-catalog`
//! - The search that drives these functions lives in `typecover-recommender`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod commonality;
pub mod effectiveness;
pub mod entity;
pub mod interaction;
pub mod multiplier;
pub mod scoring;
pub mod team;

// Re-exports for convenience
pub use candidate::{Candidate, SearchPass};
pub use effectiveness::combine_interactions;
pub use entity::{BaseStats, EntityRecord, LineageChain};
pub use interaction::TypeInteraction;
pub use multiplier::MultiplierMap;
pub use scoring::{defensive_score, score_breakdown, ScoreBreakdown};
pub use team::{net_outcome, team_score};
