//! Error types for the recommender

use thiserror::Error;
use typecover_catalog::CatalogError;

/// Errors surfaced to the caller of an analysis or a search
///
/// Only failures on the primary request end up here. Failures while
/// resolving individual candidates are logged and skipped.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// Catalog lookup for the primary entity failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The catalog returned an entity without any defensive type
    #[error("Entity '{0}' has no types")]
    NoTypes(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecommendError {
    /// True if retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, RecommendError::Catalog(e) if e.is_transient())
    }
}
