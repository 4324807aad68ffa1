//! Team cancellation model
//!
//! Reconciles teammates' multiplier maps into one net outcome per attacking
//! type, then scores it with the same function used for single entities.

use crate::commonality;
use crate::multiplier::{same, MultiplierMap, IMMUNE, NEUTRAL};
use crate::scoring::defensive_score;

/// Compute the team's net multiplier for every known attacking type
///
/// Per attacking type:
/// - any immune member makes the team immune
/// - otherwise the single best resistance is reconciled against the single
///   worst weakness (see [`reconcile`])
///
/// Attacking types outside the commonality table are ignored.
pub fn net_outcome(members: &[MultiplierMap]) -> MultiplierMap {
    commonality::attacking_type_names()
        .filter_map(|attacking| {
            net_for_type(members, attacking).map(|multiplier| (attacking, multiplier))
        })
        .collect()
}

/// Score a team after cancellation
pub fn team_score(members: &[MultiplierMap]) -> f64 {
    defensive_score(&net_outcome(members))
}

fn net_for_type(members: &[MultiplierMap], attacking: &str) -> Option<f64> {
    let mut best_resist: Option<f64> = None;
    let mut worst_weak: Option<f64> = None;

    for member in members {
        let value = member.get(attacking);
        if same(value, IMMUNE) {
            return Some(IMMUNE);
        }
        if value < NEUTRAL {
            best_resist = Some(best_resist.map_or(value, |r| r.min(value)));
        } else if value > NEUTRAL {
            worst_weak = Some(worst_weak.map_or(value, |w| w.max(value)));
        }
    }

    match (best_resist, worst_weak) {
        (None, None) => None,
        (Some(resist), None) => Some(resist),
        (None, Some(weak)) => Some(weak),
        (Some(resist), Some(weak)) => reconcile(resist, weak),
    }
}

/// Reconcile one resistance against one weakness on the same attacking type
///
/// Returns `None` when the pair cancels out to neutral.
///
/// - 0.25 against 4x or worse cancels fully
/// - 0.5 against 4x or worse leaves an effective 2x weakness
/// - 0.5 or better against exactly 2x cancels fully
/// - anything else leaves the weakness as-is
pub fn reconcile(resist: f64, weak: f64) -> Option<f64> {
    if same(resist, 0.25) && weak >= 4.0 {
        None
    } else if same(resist, 0.5) && weak >= 4.0 {
        Some(2.0)
    } else if resist <= 0.5 && same(weak, 2.0) {
        None
    } else {
        Some(weak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> MultiplierMap {
        entries.iter().map(|(t, m)| (*t, *m)).collect()
    }

    #[test]
    fn test_strong_resist_cancels_strong_weakness() {
        let net = net_outcome(&[map(&[("fire", 4.0)]), map(&[("fire", 0.25)])]);
        assert!(!net.contains("fire"));
    }

    #[test]
    fn test_resist_halves_strong_weakness() {
        let net = net_outcome(&[map(&[("fire", 4.0)]), map(&[("fire", 0.5)])]);
        assert_eq!(net.get("fire"), 2.0);
    }

    #[test]
    fn test_resist_cancels_weakness() {
        let net = net_outcome(&[map(&[("water", 2.0)]), map(&[("water", 0.5)])]);
        assert!(!net.contains("water"));

        let net = net_outcome(&[map(&[("water", 2.0)]), map(&[("water", 0.25)])]);
        assert!(!net.contains("water"));
    }

    #[test]
    fn test_immunity_wins_outright() {
        let net = net_outcome(&[
            map(&[("ground", 4.0)]),
            map(&[("ground", 0.0)]),
            map(&[("ground", 2.0)]),
        ]);
        assert_eq!(net.get("ground"), 0.0);
    }

    #[test]
    fn test_one_sided_entries() {
        let net = net_outcome(&[
            map(&[("ice", 2.0), ("grass", 0.5)]),
            map(&[("ice", 4.0), ("grass", 0.25)]),
        ]);
        assert_eq!(net.get("ice"), 4.0);
        assert_eq!(net.get("grass"), 0.25);
    }

    #[test]
    fn test_only_best_and_worst_are_reconciled() {
        // Two 0.5 resistances do not combine into a 0.25
        let net = net_outcome(&[
            map(&[("rock", 4.0)]),
            map(&[("rock", 0.5)]),
            map(&[("rock", 0.5)]),
        ]);
        assert_eq!(net.get("rock"), 2.0);
    }

    #[test]
    fn test_reconcile_fallthrough_keeps_weakness() {
        assert_eq!(reconcile(0.125, 4.0), Some(4.0));
        assert_eq!(reconcile(0.25, 8.0), None);
    }

    #[test]
    fn test_unknown_attacking_types_ignored() {
        let net = net_outcome(&[map(&[("stellar", 2.0)])]);
        assert!(net.is_empty());
    }

    #[test]
    fn test_team_score() {
        assert_eq!(team_score(&[]), 5.0);

        let lone = map(&[("water", 2.0), ("grass", 0.5)]);
        let partner = map(&[("water", 0.5)]);
        assert!(team_score(&[lone.clone(), partner]) > team_score(&[lone]));
    }
}
