//! In-memory catalog for deterministic testing
//!
//! [`MockCatalog`] answers every lookup from tables filled in by the test. It
//! can also be told to fail specific lookups, which is how the recommender's
//! skip-on-failure behaviour is exercised.

use crate::{Catalog, CatalogError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use typecover_domain::{EntityRecord, LineageChain, TypeInteraction};

/// Mock catalog backed by in-memory tables
///
/// Clones share the same tables and call counter.
///
/// # Examples
///
/// ```
/// use typecover_catalog::{Catalog, MockCatalog};
/// use typecover_domain::EntityRecord;
///
/// # #[tokio::main]
/// # async fn main() {
/// let catalog = MockCatalog::with_standard_types();
/// catalog.add_entity(EntityRecord::new(25, "pikachu", &["electric"]));
///
/// let pikachu = catalog.entity("pikachu").await.unwrap();
/// assert_eq!(pikachu.types, vec!["electric"]);
/// assert_eq!(catalog.entities_by_type("electric", 60).await.unwrap(), vec!["pikachu"]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    entities: Vec<EntityRecord>,
    types: HashMap<String, TypeInteraction>,
    lineages: HashMap<String, LineageChain>,
    failing: HashSet<String>,
    call_count: usize,
}

impl MockCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog preloaded with the standard 18-type damage chart
    pub fn with_standard_types() -> Self {
        let catalog = Self::new();
        for interaction in standard_type_chart() {
            catalog.add_type(interaction);
        }
        catalog
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add or replace a type interaction record
    pub fn add_type(&self, interaction: TypeInteraction) {
        self.state().types.insert(interaction.name.clone(), interaction);
    }

    /// Add an entity; it is listed under each of its types in insertion order
    pub fn add_entity(&self, entity: EntityRecord) {
        let mut state = self.state();
        state.entities.retain(|e| e.name != entity.name);
        state.entities.push(entity);
    }

    /// Register a lineage chain under a lineage reference
    pub fn add_lineage(&self, lineage_ref: impl Into<String>, chain: LineageChain) {
        self.state().lineages.insert(lineage_ref.into(), chain);
    }

    /// Make every lookup of `key` fail with a transient error
    ///
    /// `key` is matched against entity names, type names and lineage refs.
    pub fn fail_lookup(&self, key: impl Into<String>) {
        self.state().failing.insert(key.into());
    }

    /// Total number of lookups served (including failed ones)
    pub fn call_count(&self) -> usize {
        self.state().call_count
    }

    /// Reset the call counter
    pub fn reset_call_count(&self) {
        self.state().call_count = 0;
    }

    fn begin(&self, key: &str) -> Result<MutexGuard<'_, MockState>, CatalogError> {
        let mut state = self.state();
        state.call_count += 1;
        if state.failing.contains(key) {
            return Err(CatalogError::Transient(format!("Mock failure for {}", key)));
        }
        Ok(state)
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn entity(&self, name_or_id: &str) -> Result<EntityRecord, CatalogError> {
        let state = self.begin(name_or_id)?;
        state
            .entities
            .iter()
            .find(|e| e.name == name_or_id || e.id.to_string() == name_or_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("entity {}", name_or_id)))
    }

    async fn type_interaction(&self, type_name: &str) -> Result<TypeInteraction, CatalogError> {
        let state = self.begin(type_name)?;
        state
            .types
            .get(type_name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("type {}", type_name)))
    }

    async fn lineage(&self, lineage_ref: &str) -> Result<LineageChain, CatalogError> {
        let state = self.begin(lineage_ref)?;
        state
            .lineages
            .get(lineage_ref)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("lineage {}", lineage_ref)))
    }

    async fn entities_by_type(
        &self,
        type_name: &str,
        limit: usize,
    ) -> Result<Vec<String>, CatalogError> {
        let state = self.begin(type_name)?;
        Ok(state
            .entities
            .iter()
            .filter(|e| e.types.iter().any(|t| t == type_name))
            .take(limit)
            .map(|e| e.name.clone())
            .collect())
    }
}

/// The standard 18-type defensive damage chart
pub fn standard_type_chart() -> Vec<TypeInteraction> {
    vec![
        TypeInteraction::new("normal")
            .with_double_from(&["fighting"])
            .with_no_damage_from(&["ghost"]),
        TypeInteraction::new("fire")
            .with_double_from(&["water", "ground", "rock"])
            .with_half_from(&["fire", "grass", "ice", "bug", "steel", "fairy"]),
        TypeInteraction::new("water")
            .with_double_from(&["electric", "grass"])
            .with_half_from(&["fire", "water", "ice", "steel"]),
        TypeInteraction::new("electric")
            .with_double_from(&["ground"])
            .with_half_from(&["electric", "flying", "steel"]),
        TypeInteraction::new("grass")
            .with_double_from(&["fire", "ice", "poison", "flying", "bug"])
            .with_half_from(&["water", "electric", "grass", "ground"]),
        TypeInteraction::new("ice")
            .with_double_from(&["fire", "fighting", "rock", "steel"])
            .with_half_from(&["ice"]),
        TypeInteraction::new("fighting")
            .with_double_from(&["flying", "psychic", "fairy"])
            .with_half_from(&["bug", "rock", "dark"]),
        TypeInteraction::new("poison")
            .with_double_from(&["ground", "psychic"])
            .with_half_from(&["grass", "fighting", "poison", "bug", "fairy"]),
        TypeInteraction::new("ground")
            .with_double_from(&["water", "grass", "ice"])
            .with_half_from(&["poison", "rock"])
            .with_no_damage_from(&["electric"]),
        TypeInteraction::new("flying")
            .with_double_from(&["electric", "ice", "rock"])
            .with_half_from(&["grass", "fighting", "bug"])
            .with_no_damage_from(&["ground"]),
        TypeInteraction::new("psychic")
            .with_double_from(&["bug", "ghost", "dark"])
            .with_half_from(&["fighting", "psychic"]),
        TypeInteraction::new("bug")
            .with_double_from(&["fire", "flying", "rock"])
            .with_half_from(&["grass", "fighting", "ground"]),
        TypeInteraction::new("rock")
            .with_double_from(&["water", "grass", "fighting", "ground", "steel"])
            .with_half_from(&["normal", "fire", "poison", "flying"]),
        TypeInteraction::new("ghost")
            .with_double_from(&["ghost", "dark"])
            .with_half_from(&["poison", "bug"])
            .with_no_damage_from(&["normal", "fighting"]),
        TypeInteraction::new("dragon")
            .with_double_from(&["ice", "dragon", "fairy"])
            .with_half_from(&["fire", "water", "electric", "grass"]),
        TypeInteraction::new("dark")
            .with_double_from(&["fighting", "bug", "fairy"])
            .with_half_from(&["ghost", "dark"])
            .with_no_damage_from(&["psychic"]),
        TypeInteraction::new("steel")
            .with_double_from(&["fire", "fighting", "ground"])
            .with_half_from(&[
                "normal", "grass", "ice", "flying", "psychic", "bug", "rock", "dragon", "steel",
                "fairy",
            ])
            .with_no_damage_from(&["poison"]),
        TypeInteraction::new("fairy")
            .with_double_from(&["poison", "steel"])
            .with_half_from(&["fighting", "bug", "dark"])
            .with_no_damage_from(&["dragon"]),
    ]
}
