//! Typecover Catalog Layer
//!
//! The boundary between the engine and the external catalog service.
//!
//! # Architecture
//!
//! The engine never talks HTTP directly. It consumes the [`Catalog`] trait,
//! which exposes four idempotent lookups. Every response may be cached for
//! the lifetime of the session.
//!
//! # Implementations
//!
//! - [`PokeApiCatalog`]: REST client for a PokeAPI-compatible service, with a
//!   per-URL [`ResponseCache`]
//! - [`MockCatalog`]: in-memory tables for deterministic testing
//!
//! # Examples
//!
//! ```
//! use typecover_catalog::{Catalog, MockCatalog};
//! use typecover_domain::combine_interactions;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), typecover_catalog::CatalogError> {
//! let catalog = MockCatalog::with_standard_types();
//! let water = catalog.type_interaction("water").await?;
//! let ground = catalog.type_interaction("ground").await?;
//!
//! let map = combine_interactions(&[water, ground]);
//! assert_eq!(map.get("grass"), 4.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod error;
pub mod mock;
pub mod pokeapi;

use async_trait::async_trait;
use typecover_domain::{EntityRecord, LineageChain, TypeInteraction};

pub use cache::{CacheStats, ResponseCache};
pub use config::CatalogConfig;
pub use error::CatalogError;
pub use mock::{standard_type_chart, MockCatalog};
pub use pokeapi::PokeApiCatalog;

/// Lookups the engine needs from the external catalog
///
/// All operations are idempotent reads.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Look up an entity by name or numeric id
    ///
    /// Fails with [`CatalogError::NotFound`] if the entity is unknown.
    async fn entity(&self, name_or_id: &str) -> Result<EntityRecord, CatalogError>;

    /// Look up the damage relations of one defensive type
    async fn type_interaction(&self, type_name: &str) -> Result<TypeInteraction, CatalogError>;

    /// Resolve a lineage reference to its chain, base form first
    async fn lineage(&self, lineage_ref: &str) -> Result<LineageChain, CatalogError>;

    /// List up to `limit` entity names having the given type
    async fn entities_by_type(
        &self,
        type_name: &str,
        limit: usize,
    ) -> Result<Vec<String>, CatalogError>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for std::sync::Arc<C> {
    async fn entity(&self, name_or_id: &str) -> Result<EntityRecord, CatalogError> {
        (**self).entity(name_or_id).await
    }

    async fn type_interaction(&self, type_name: &str) -> Result<TypeInteraction, CatalogError> {
        (**self).type_interaction(type_name).await
    }

    async fn lineage(&self, lineage_ref: &str) -> Result<LineageChain, CatalogError> {
        (**self).lineage(lineage_ref).await
    }

    async fn entities_by_type(
        &self,
        type_name: &str,
        limit: usize,
    ) -> Result<Vec<String>, CatalogError> {
        (**self).entities_by_type(type_name, limit).await
    }
}
