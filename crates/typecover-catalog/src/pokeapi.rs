//! HTTP catalog implementation
//!
//! Talks to a PokeAPI-compatible REST service. Every JSON body is cached per
//! URL for the lifetime of the client, so repeated lookups within a session
//! cost one request each.
//!
//! # Endpoints
//!
//! - `GET /pokemon/{name}` - entity records
//! - `GET /type/{name}` - damage relations and type membership
//! - `GET /pokemon-species/{name}` - link from a species to its evolution chain
//! - `GET /evolution-chain/{id}` - the chain itself
//!
//! # Examples
//!
//! ```no_run
//! use typecover_catalog::{Catalog, CatalogConfig, PokeApiCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = PokeApiCatalog::new(CatalogConfig::default())?;
//! let garchomp = catalog.entity("garchomp").await?;
//! assert_eq!(garchomp.types, vec!["dragon", "ground"]);
//! # Ok(())
//! # }
//! ```

use crate::cache::{CacheStats, ResponseCache};
use crate::{Catalog, CatalogConfig, CatalogError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use typecover_domain::{BaseStats, EntityRecord, LineageChain, TypeInteraction};

/// Catalog backed by a PokeAPI-compatible HTTP service
pub struct PokeApiCatalog {
    config: CatalogConfig,
    client: reqwest::Client,
    cache: ResponseCache<Value>,
}

#[derive(Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStat>,
    #[serde(default)]
    sprites: Option<Sprites>,
    species: NamedResource,
}

#[derive(Deserialize)]
struct PokemonTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Deserialize)]
struct PokemonStat {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Deserialize)]
struct TypeResponse {
    name: String,
    damage_relations: DamageRelations,
    #[serde(default)]
    pokemon: Vec<TypeMember>,
}

#[derive(Deserialize)]
struct DamageRelations {
    double_damage_from: Vec<NamedResource>,
    half_damage_from: Vec<NamedResource>,
    no_damage_from: Vec<NamedResource>,
}

#[derive(Deserialize)]
struct TypeMember {
    pokemon: NamedResource,
}

#[derive(Deserialize)]
struct SpeciesResponse {
    evolution_chain: Option<UrlResource>,
}

#[derive(Deserialize)]
struct UrlResource {
    url: String,
}

#[derive(Deserialize)]
struct EvolutionChainResponse {
    id: u32,
    chain: ChainLink,
}

#[derive(Deserialize)]
struct ChainLink {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<ChainLink>,
}

impl PokeApiCatalog {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate().map_err(CatalogError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            cache: ResponseCache::new(),
        })
    }

    /// Create a client against the public API with default settings
    pub fn default_endpoint() -> Result<Self, CatalogError> {
        Self::new(CatalogConfig::default())
    }

    /// Hit/miss counters of the response cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let body = self
            .cache
            .get_or_try_fetch(url, || self.fetch_json(url))
            .await?;
        serde_json::from_value(body)
            .map_err(|e| CatalogError::Malformed(format!("{}: {}", url, e)))
    }

    /// Fetch one JSON body, retrying transient failures with exponential backoff
    async fn fetch_json(&self, url: &str) -> Result<Value, CatalogError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            debug!(url, attempt = attempts + 1, "catalog request");
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json::<Value>().await.map_err(|e| {
                            CatalogError::Malformed(format!("Failed to parse {}: {}", url, e))
                        });
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(CatalogError::NotFound(url.to_string()));
                    } else if status.is_server_error()
                        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        last_error = Some(CatalogError::Transient(format!("HTTP {} from {}", status, url)));
                    } else {
                        return Err(CatalogError::Malformed(format!("HTTP {} from {}", status, url)));
                    }
                }
                Err(e) => {
                    let error = CatalogError::from(e);
                    if !error.is_transient() {
                        return Err(error);
                    }
                    last_error = Some(error);
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(url, ?delay, "transient catalog failure, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CatalogError::Transient(format!("Max retries exceeded for {}", url))
        }))
    }
}

#[async_trait]
impl Catalog for PokeApiCatalog {
    async fn entity(&self, name_or_id: &str) -> Result<EntityRecord, CatalogError> {
        let url = self.url_for(&format!("pokemon/{}", name_or_id.trim().to_lowercase()));
        let response: PokemonResponse = self.get(&url).await?;
        Ok(entity_from_response(response))
    }

    async fn type_interaction(&self, type_name: &str) -> Result<TypeInteraction, CatalogError> {
        let url = self.url_for(&format!("type/{}", type_name.to_lowercase()));
        let response: TypeResponse = self.get(&url).await?;
        let names = |resources: Vec<NamedResource>| -> Vec<String> {
            resources.into_iter().map(|r| r.name).collect()
        };

        Ok(TypeInteraction {
            name: response.name,
            double_damage_from: names(response.damage_relations.double_damage_from),
            half_damage_from: names(response.damage_relations.half_damage_from),
            no_damage_from: names(response.damage_relations.no_damage_from),
        })
    }

    async fn lineage(&self, lineage_ref: &str) -> Result<LineageChain, CatalogError> {
        let species_url = self.url_for(&format!("pokemon-species/{}", lineage_ref));
        let species: SpeciesResponse = self.get(&species_url).await?;
        let chain_url = species
            .evolution_chain
            .map(|resource| resource.url)
            .ok_or_else(|| CatalogError::NotFound(format!("evolution chain for {}", lineage_ref)))?;

        let response: EvolutionChainResponse = self.get(&chain_url).await?;
        Ok(LineageChain {
            id: response.id.to_string(),
            members: flatten_chain(&response.chain),
        })
    }

    async fn entities_by_type(
        &self,
        type_name: &str,
        limit: usize,
    ) -> Result<Vec<String>, CatalogError> {
        let url = self.url_for(&format!("type/{}", type_name.to_lowercase()));
        let response: TypeResponse = self.get(&url).await?;
        Ok(response
            .pokemon
            .into_iter()
            .take(limit)
            .map(|member| member.pokemon.name)
            .collect())
    }
}

fn entity_from_response(response: PokemonResponse) -> EntityRecord {
    let mut slots = response.types;
    slots.sort_by_key(|slot| slot.slot);

    let mut stats = BaseStats::default();
    for entry in &response.stats {
        let value = entry.base_stat;
        match entry.stat.name.as_str() {
            "hp" => stats.hp = value,
            "attack" => stats.attack = value,
            "defense" => stats.defense = value,
            "special-attack" => stats.special_attack = value,
            "special-defense" => stats.special_defense = value,
            "speed" => stats.speed = value,
            _ => {}
        }
    }

    EntityRecord {
        id: response.id,
        name: response.name,
        types: slots.into_iter().map(|slot| slot.kind.name).collect(),
        stats,
        sprite: response.sprites.and_then(|s| s.front_default),
        lineage_ref: Some(response.species.name),
    }
}

/// Walk the chain from the base form along the first branch at every step
fn flatten_chain(root: &ChainLink) -> Vec<String> {
    let mut members = vec![root.species.name.clone()];
    let mut link = root;
    while let Some(next) = link.evolves_to.first() {
        members.push(next.species.name.clone());
        link = next;
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let catalog = PokeApiCatalog::default_endpoint().unwrap();
        assert_eq!(catalog.url_for("type/fire"), "https://pokeapi.co/api/v2/type/fire");
        assert_eq!(catalog.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = CatalogConfig {
            base_url: "http://localhost:8000/api/v2/".to_string(),
            ..CatalogConfig::default()
        };
        let catalog = PokeApiCatalog::new(config).unwrap();
        assert_eq!(catalog.url_for("pokemon/1"), "http://localhost:8000/api/v2/pokemon/1");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CatalogConfig {
            timeout_secs: 0,
            ..CatalogConfig::default()
        };
        assert!(matches!(PokeApiCatalog::new(config), Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_entity_parsing() {
        let body = serde_json::json!({
            "id": 445,
            "name": "garchomp",
            "types": [
                {"slot": 2, "type": {"name": "ground", "url": "https://pokeapi.co/api/v2/type/5/"}},
                {"slot": 1, "type": {"name": "dragon", "url": "https://pokeapi.co/api/v2/type/16/"}}
            ],
            "stats": [
                {"base_stat": 108, "stat": {"name": "hp"}},
                {"base_stat": 130, "stat": {"name": "attack"}},
                {"base_stat": 95, "stat": {"name": "defense"}},
                {"base_stat": 80, "stat": {"name": "special-attack"}},
                {"base_stat": 85, "stat": {"name": "special-defense"}},
                {"base_stat": 102, "stat": {"name": "speed"}}
            ],
            "sprites": {"front_default": "https://example.test/445.png"},
            "species": {"name": "garchomp", "url": "https://pokeapi.co/api/v2/pokemon-species/445/"}
        });

        let response: PokemonResponse = serde_json::from_value(body).unwrap();
        let entity = entity_from_response(response);

        assert_eq!(entity.types, vec!["dragon", "ground"]);
        assert_eq!(entity.stats.attack, 130);
        assert_eq!(entity.stats.total(), 600);
        assert_eq!(entity.sprite.as_deref(), Some("https://example.test/445.png"));
        assert_eq!(entity.lineage_ref.as_deref(), Some("garchomp"));
    }

    #[test]
    fn test_chain_flattening_follows_first_branch() {
        let body = serde_json::json!({
            "id": 67,
            "chain": {
                "species": {"name": "eevee"},
                "evolves_to": [
                    {"species": {"name": "vaporeon"}, "evolves_to": []},
                    {"species": {"name": "jolteon"}, "evolves_to": []}
                ]
            }
        });

        let response: EvolutionChainResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.id, 67);
        assert_eq!(flatten_chain(&response.chain), vec!["eevee", "vaporeon"]);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transient() {
        let config = CatalogConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            max_retries: 1,
            ..CatalogConfig::default()
        };
        let catalog = PokeApiCatalog::new(config).unwrap();

        match catalog.entity("pikachu").await {
            Err(CatalogError::Transient(_)) => {} // Expected
            other => panic!("Expected Transient error, got {:?}", other.map(|e| e.name)),
        }
    }

    // Integration tests (requires network access)
    #[tokio::test]
    #[ignore]
    async fn test_live_lookup_integration() {
        let catalog = PokeApiCatalog::default_endpoint().unwrap();
        let entity = catalog.entity("charmander").await.unwrap();
        let chain = catalog.lineage(entity.lineage_ref.as_deref().unwrap()).await.unwrap();
        assert_eq!(chain.final_form(), Some("charizard"));

        catalog.entity("charmander").await.unwrap();
        assert!(catalog.cache_stats().hits >= 1);
    }
}
