//! Entity records returned by the catalog

use serde::{Deserialize, Serialize};

/// Number of entries in a stat vector
pub const STAT_COUNT: usize = 6;

/// Base stats in their fixed vector order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Hit points
    pub hp: u32,
    /// Physical attack
    pub attack: u32,
    /// Physical defense
    pub defense: u32,
    /// Special attack
    pub special_attack: u32,
    /// Special defense
    pub special_defense: u32,
    /// Speed
    pub speed: u32,
}

impl BaseStats {
    /// Stats as a vector: hp, attack, defense, special attack, special defense, speed
    pub fn as_vector(&self) -> [f64; STAT_COUNT] {
        [
            self.hp as f64,
            self.attack as f64,
            self.defense as f64,
            self.special_attack as f64,
            self.special_defense as f64,
            self.speed as f64,
        ]
    }

    /// Sum of all base stats
    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.special_attack + self.special_defense + self.speed
    }
}

/// Component-wise mean of stat vectors, `None` for an empty input
pub fn mean_vector<'a, I>(vectors: I) -> Option<[f64; STAT_COUNT]>
where
    I: IntoIterator<Item = &'a [f64; STAT_COUNT]>,
{
    let mut sum = [0.0; STAT_COUNT];
    let mut count = 0usize;
    for vector in vectors {
        for (acc, value) in sum.iter_mut().zip(vector) {
            *acc += value;
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(sum.map(|total| total / count as f64))
}

/// Squared Euclidean distance between two stat vectors
pub fn squared_distance(a: &[f64; STAT_COUNT], b: &[f64; STAT_COUNT]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// An entity as described by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Catalog identifier
    pub id: u32,
    /// Lookup name
    pub name: String,
    /// Defensive types in slot order (one or two)
    pub types: Vec<String>,
    /// Base stats
    pub stats: BaseStats,
    /// Sprite URL, if the catalog has one
    #[serde(default)]
    pub sprite: Option<String>,
    /// Reference resolvable to a lineage chain
    #[serde(default)]
    pub lineage_ref: Option<String>,
}

impl EntityRecord {
    /// Create a record with default stats and no sprite or lineage
    pub fn new(id: u32, name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: BaseStats::default(),
            sprite: None,
            lineage_ref: None,
        }
    }

    /// Builder: set base stats
    pub fn with_stats(mut self, stats: BaseStats) -> Self {
        self.stats = stats;
        self
    }

    /// Builder: set the sprite URL
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Builder: set the lineage reference
    pub fn with_lineage(mut self, lineage_ref: impl Into<String>) -> Self {
        self.lineage_ref = Some(lineage_ref.into());
        self
    }
}

/// An evolutionary family, ordered from base to final form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageChain {
    /// Family identifier used to deduplicate recommendations
    pub id: String,
    /// Member names, base form first
    pub members: Vec<String>,
}

impl LineageChain {
    /// Create a chain from member names
    pub fn new(id: impl Into<String>, members: &[&str]) -> Self {
        Self {
            id: id.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// The final form, if the chain is non-empty
    pub fn final_form(&self) -> Option<&str> {
        self.members.last().map(String::as_str)
    }
}
