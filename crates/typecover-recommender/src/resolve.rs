//! Catalog resolution shared by the analyzer and the search

use futures::future::try_join_all;
use typecover_catalog::{Catalog, CatalogError};
use typecover_domain::{combine_interactions, defensive_score, EntityRecord, MultiplierMap};

/// Fetch the interactions of every type concurrently and combine them
pub(crate) async fn multipliers_for<C>(
    catalog: &C,
    types: &[String],
) -> Result<MultiplierMap, CatalogError>
where
    C: Catalog + ?Sized,
{
    let interactions = try_join_all(types.iter().map(|t| catalog.type_interaction(t))).await?;
    Ok(combine_interactions(&interactions))
}

/// A pool entry resolved to its final form
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub entity: EntityRecord,
    pub lineage_id: String,
    pub multipliers: MultiplierMap,
    pub individual_score: f64,
}

/// Resolve a pool name: entity, lineage, final form, type interactions
///
/// An entity without a lineage reference is treated as its own one-member
/// lineage.
pub(crate) async fn resolve_final_form<C>(catalog: &C, name: &str) -> Result<Resolved, CatalogError>
where
    C: Catalog + ?Sized,
{
    let entity = catalog.entity(name).await?;

    let (lineage_id, entity) = match entity.lineage_ref.as_deref() {
        Some(lineage_ref) => {
            let chain = catalog.lineage(lineage_ref).await?;
            let final_form = chain.final_form().ok_or_else(|| {
                CatalogError::Malformed(format!("lineage {} has no members", chain.id))
            })?;
            let entity = if final_form == entity.name {
                entity
            } else {
                catalog.entity(final_form).await?
            };
            (chain.id, entity)
        }
        None => (entity.name.clone(), entity),
    };

    if entity.types.is_empty() {
        return Err(CatalogError::Malformed(format!("{} has no types", entity.name)));
    }

    let multipliers = multipliers_for(catalog, &entity.types).await?;
    let individual_score = defensive_score(&multipliers);

    Ok(Resolved {
        entity,
        lineage_id,
        multipliers,
        individual_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use typecover_catalog::MockCatalog;
    use typecover_domain::LineageChain;

    #[tokio::test]
    async fn test_resolves_to_final_form() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(7, "squirtle", &["water"]).with_lineage("squirtle"));
        catalog.add_entity(EntityRecord::new(9, "blastoise", &["water"]).with_lineage("squirtle"));
        catalog.add_lineage("squirtle", LineageChain::new("3", &["squirtle", "wartortle", "blastoise"]));

        let resolved = resolve_final_form(&catalog, "squirtle").await.unwrap();
        assert_eq!(resolved.entity.name, "blastoise");
        assert_eq!(resolved.lineage_id, "3");
        assert_eq!(resolved.multipliers.get("electric"), 2.0);
        assert!(resolved.individual_score > 0.0);
    }

    #[tokio::test]
    async fn test_missing_final_form_fails() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(7, "squirtle", &["water"]).with_lineage("squirtle"));
        catalog.add_lineage("squirtle", LineageChain::new("3", &["squirtle", "blastoise"]));

        let err = resolve_final_form(&catalog, "squirtle").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_type_failure_propagates() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(1, "lonely", &["ghost"]));
        catalog.fail_lookup("ghost");

        let err = resolve_final_form(&catalog, "lonely").await.unwrap_err();
        assert!(err.is_transient());
    }
}
