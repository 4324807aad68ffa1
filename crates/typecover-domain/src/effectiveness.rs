//! Effectiveness calculator
//!
//! Folds an entity's type interaction records into one multiplier map.

use crate::multiplier::{MultiplierMap, IMMUNE, NEUTRAL};
use crate::TypeInteraction;
use std::collections::{BTreeMap, BTreeSet};

/// Combine type interaction records into a multiplier map
///
/// Double damage multiplies by 2 and half damage by 0.5, so two weaknesses
/// compound to 4 and a weakness plus a resistance nets to neutral. Immunities
/// are collected separately and applied last: once any record grants an
/// immunity, no multiply from any other record can lift it off zero.
///
/// # Examples
///
/// ```
/// use typecover_domain::{combine_interactions, TypeInteraction};
///
/// let water = TypeInteraction::new("water")
///     .with_double_from(&["electric", "grass"])
///     .with_half_from(&["fire", "water", "ice", "steel"]);
/// let ground = TypeInteraction::new("ground")
///     .with_double_from(&["water", "grass", "ice"])
///     .with_half_from(&["poison", "rock"])
///     .with_no_damage_from(&["electric"]);
///
/// let map = combine_interactions(&[water, ground]);
/// assert_eq!(map.get("grass"), 4.0);
/// assert_eq!(map.get("electric"), 0.0);
/// assert_eq!(map.get("water"), 1.0);
/// ```
pub fn combine_interactions<'a, I>(interactions: I) -> MultiplierMap
where
    I: IntoIterator<Item = &'a TypeInteraction>,
{
    let mut product: BTreeMap<&str, f64> = BTreeMap::new();
    let mut immune: BTreeSet<&str> = BTreeSet::new();

    for interaction in interactions {
        for attacking in &interaction.double_damage_from {
            *product.entry(attacking.as_str()).or_insert(NEUTRAL) *= 2.0;
        }
        for attacking in &interaction.half_damage_from {
            *product.entry(attacking.as_str()).or_insert(NEUTRAL) *= 0.5;
        }
        for attacking in &interaction.no_damage_from {
            immune.insert(attacking.as_str());
        }
    }

    product
        .into_iter()
        .filter(|(attacking, _)| !immune.contains(attacking))
        .chain(immune.iter().map(|attacking| (*attacking, IMMUNE)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flying() -> TypeInteraction {
        TypeInteraction::new("flying")
            .with_double_from(&["electric", "ice", "rock"])
            .with_half_from(&["grass", "fighting", "bug"])
            .with_no_damage_from(&["ground"])
    }

    fn rock() -> TypeInteraction {
        TypeInteraction::new("rock")
            .with_double_from(&["water", "grass", "fighting", "ground", "steel"])
            .with_half_from(&["normal", "fire", "poison", "flying"])
    }

    #[test]
    fn test_single_type() {
        let map = combine_interactions(&[flying()]);
        assert_eq!(map.get("electric"), 2.0);
        assert_eq!(map.get("grass"), 0.5);
        assert_eq!(map.get("ground"), 0.0);
        assert_eq!(map.get("fire"), 1.0);
    }

    #[test]
    fn test_dual_type_compounds_and_cancels() {
        let map = combine_interactions(&[rock(), flying()]);
        // rock weak + flying resists
        assert_eq!(map.get("grass"), 1.0);
        assert!(!map.contains("grass"));
        assert_eq!(map.get("fighting"), 1.0);
        assert_eq!(map.get("rock"), 2.0);
        assert_eq!(map.get("electric"), 2.0);
    }

    #[test]
    fn test_immunity_survives_later_weakness() {
        // flying is immune to ground, rock is weak to it; order must not matter
        let forward = combine_interactions(&[flying(), rock()]);
        let reverse = combine_interactions(&[rock(), flying()]);
        assert_eq!(forward.get("ground"), 0.0);
        assert_eq!(reverse.get("ground"), 0.0);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_immunity_survives_resistance() {
        let resist = TypeInteraction::new("a").with_half_from(&["ghost"]);
        let immune = TypeInteraction::new("b").with_no_damage_from(&["ghost"]);
        assert_eq!(combine_interactions(&[immune.clone(), resist.clone()]).get("ghost"), 0.0);
        assert_eq!(combine_interactions(&[resist, immune]).get("ghost"), 0.0);
    }

    #[test]
    fn test_empty_records_are_noop() {
        assert!(combine_interactions(&[TypeInteraction::new("void")]).is_empty());
        assert!(combine_interactions(&Vec::<TypeInteraction>::new()).is_empty());
    }
}
