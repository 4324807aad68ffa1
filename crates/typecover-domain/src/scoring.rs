//! Defensive score computation
//!
//! Turns a multiplier map into a single comparable figure in [0, 10]. The
//! same function scores individual entities and reconciled team outcomes.
//!
//! Each non-neutral entry lands in one of five buckets and contributes
//! points weighted by how common its attacking type is:
//!
//! | Bucket | Multiplier | Contribution |
//! |--------|------------|--------------|
//! | immune | 0 | defense `8 + 2w`, plus a flat `3` |
//! | strong resist | 0.25 | defense `4 + w` |
//! | resist | 0.5 | defense `2 + 0.5w` |
//! | weak | 2 | weakness `3 + 1.5w`, plus a flat `2` |
//! | strong weak | >= 4 | weakness `8 + 4w`, plus a flat `2` |
//!
//! Common attacking types that the map resists or blocks earn a further
//! `1.5w` of defense. The score is `10 * defense / (defense + weakness)`.

use crate::commonality;
use crate::multiplier::{same, MultiplierMap, IMMUNE, NEUTRAL};
use serde::{Deserialize, Serialize};

/// Score of a map with no non-neutral entries
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Highest possible score
pub const MAX_SCORE: f64 = 10.0;

/// Flat defense bonus per immunity
const IMMUNITY_COUNT_BONUS: f64 = 3.0;

/// Flat weakness penalty per weakness of any severity
const WEAKNESS_COUNT_PENALTY: f64 = 2.0;

/// Multiplier on the commonality weight for each avoided common type
const AVOIDANCE_FACTOR: f64 = 1.5;

/// Scoring bucket for a single multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Takes no damage
    Immune,
    /// Takes a quarter damage (or less)
    StrongResist,
    /// Takes half damage
    Resist,
    /// Takes double damage
    Weak,
    /// Takes quadruple damage or more
    StrongWeak,
}

impl Bucket {
    /// Classify a multiplier; neutral values have no bucket
    pub fn classify(multiplier: f64) -> Option<Self> {
        if same(multiplier, IMMUNE) {
            Some(Bucket::Immune)
        } else if multiplier <= 0.25 {
            Some(Bucket::StrongResist)
        } else if multiplier < NEUTRAL {
            Some(Bucket::Resist)
        } else if same(multiplier, NEUTRAL) {
            None
        } else if multiplier < 4.0 {
            Some(Bucket::Weak)
        } else {
            Some(Bucket::StrongWeak)
        }
    }

    /// Points contributed by one entry of this bucket with weight `w`
    fn points(self, w: f64) -> f64 {
        match self {
            Bucket::Immune => 8.0 + 2.0 * w,
            Bucket::StrongResist => 4.0 + w,
            Bucket::Resist => 2.0 + 0.5 * w,
            Bucket::Weak => 3.0 + 1.5 * w,
            Bucket::StrongWeak => 8.0 + 4.0 * w,
        }
    }

    /// Whether this bucket counts against the defender
    fn is_weakness(self) -> bool {
        matches!(self, Bucket::Weak | Bucket::StrongWeak)
    }
}

/// Full account of how a score was reached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Attacking types dealing no damage
    pub immune: Vec<String>,
    /// Attacking types dealing a quarter damage
    pub strong_resist: Vec<String>,
    /// Attacking types dealing half damage
    pub resist: Vec<String>,
    /// Attacking types dealing double damage
    pub weak: Vec<String>,
    /// Attacking types dealing quadruple damage or more
    pub strong_weak: Vec<String>,
    /// Common attacking types that earned the avoidance bonus
    pub avoided_common: Vec<String>,
    /// Total defense points
    pub defense: f64,
    /// Total weakness points
    pub weakness: f64,
    /// Final score in [0, 10]
    pub score: f64,
}

impl ScoreBreakdown {
    /// Number of weaknesses of any severity
    pub fn weakness_count(&self) -> usize {
        self.weak.len() + self.strong_weak.len()
    }
}

/// Compute the defensive score of a multiplier map
pub fn defensive_score(map: &MultiplierMap) -> f64 {
    score_breakdown(map).score
}

/// Compute the defensive score along with its intermediate totals
///
/// # Examples
///
/// ```
/// use typecover_domain::{score_breakdown, MultiplierMap};
///
/// let map: MultiplierMap = [("water", 2.0), ("grass", 0.5)].into_iter().collect();
/// let breakdown = score_breakdown(&map);
/// assert_eq!(breakdown.weakness, 8.75);
/// assert_eq!(breakdown.defense, 2.5);
/// assert!(breakdown.score < 5.0);
/// ```
pub fn score_breakdown(map: &MultiplierMap) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    for (attacking, multiplier) in map.iter() {
        let Some(bucket) = Bucket::classify(multiplier) else {
            continue;
        };
        let w = commonality::weight(attacking);
        let points = bucket.points(w);

        if bucket.is_weakness() {
            breakdown.weakness += points + WEAKNESS_COUNT_PENALTY;
        } else {
            breakdown.defense += points;
        }

        let target = match bucket {
            Bucket::Immune => {
                breakdown.defense += IMMUNITY_COUNT_BONUS;
                &mut breakdown.immune
            }
            Bucket::StrongResist => &mut breakdown.strong_resist,
            Bucket::Resist => &mut breakdown.resist,
            Bucket::Weak => &mut breakdown.weak,
            Bucket::StrongWeak => &mut breakdown.strong_weak,
        };
        target.push(attacking.to_string());

        if !bucket.is_weakness() && commonality::is_common(attacking) {
            breakdown.defense += AVOIDANCE_FACTOR * w;
            breakdown.avoided_common.push(attacking.to_string());
        }
    }

    breakdown.score = ratio(breakdown.defense, breakdown.weakness);
    breakdown
}

fn ratio(defense: f64, weakness: f64) -> f64 {
    if defense == 0.0 && weakness == 0.0 {
        return NEUTRAL_SCORE;
    }
    if weakness == 0.0 {
        return MAX_SCORE;
    }
    (MAX_SCORE * defense / (defense + weakness)).clamp(0.0, MAX_SCORE)
}
