//! Typecover Recommender
//!
//! Defensive analysis and streaming teammate recommendation on top of a
//! [`Catalog`](typecover_catalog::Catalog).
//!
//! # Architecture
//!
//! ```text
//! reference -> Catalog -> multiplier map -> weaknesses
//!           -> pool (entities of each weak-against type, shuffled)
//!           -> pass 1 / pass 2 / pass 3 -> Candidate stream
//! ```
//!
//! # Example Usage
//!
//! ```
//! use futures::StreamExt;
//! use std::sync::Arc;
//! use typecover_catalog::MockCatalog;
//! use typecover_domain::EntityRecord;
//! use typecover_recommender::{NoShuffle, Recommender, RecommenderConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), typecover_recommender::RecommendError> {
//! let catalog = MockCatalog::with_standard_types();
//! catalog.add_entity(EntityRecord::new(4, "charmander", &["fire"]));
//! catalog.add_entity(EntityRecord::new(7, "squirtle", &["water"]));
//!
//! let recommender = Recommender::new(Arc::new(catalog), RecommenderConfig::default())?;
//! let mut stream = recommender.recommend_with("charmander", NoShuffle).await?;
//!
//! while let Some(candidate) = stream.next().await {
//!     println!("{} covers {:?}", candidate.name, candidate.newly_covered);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod resolve;
mod search;
mod shuffle;

pub use analyzer::{Analyzer, Comparison, EntityProfile, TeamReport};
pub use config::RecommenderConfig;
pub use error::RecommendError;
pub use search::{CandidateStream, Recommender};
pub use shuffle::{NoShuffle, PoolShuffle, SeededShuffle};
