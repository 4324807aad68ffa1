//! Streaming teammate recommendation
//!
//! The search is a lazy stream over a shuffled pool of catalog entries. It
//! makes up to three passes over whatever is left of the pool:
//!
//! 1. **New coverage**: candidates that resist or block a team weakness
//!    nobody covers yet
//! 2. **Any coverage**: candidates covering any open weakness
//! 3. **Diversity**: candidates whose base stats differ from the mean of
//!    those already accepted
//!
//! Accepted candidates extend the open weakness set with their own
//! weaknesses, so later picks are asked to cover them too. No two picks share
//! a lineage and no defensive type is carried by more than `type_cap` picks.

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::resolve::{multipliers_for, resolve_final_form, Resolved};
use crate::shuffle::{PoolShuffle, SeededShuffle};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};
use typecover_catalog::Catalog;
use typecover_domain::entity::{mean_vector, squared_distance, STAT_COUNT};
use typecover_domain::{Candidate, EntityRecord, MultiplierMap, SearchPass};

/// Stream of recommended teammates
pub type CandidateStream = BoxStream<'static, Candidate>;

/// Squared-distance units per diversity point
const DIVERSITY_STEP: f64 = 120.0;

/// Highest diversity score
const DIVERSITY_MAX: f64 = 2.0;

/// Recommends teammates that close a reference entity's coverage gaps
pub struct Recommender<C> {
    catalog: Arc<C>,
    config: RecommenderConfig,
}

impl<C> Recommender<C>
where
    C: Catalog + 'static,
{
    /// Create a recommender, validating the configuration
    pub fn new(catalog: Arc<C>, config: RecommenderConfig) -> Result<Self, RecommendError> {
        config.validate().map_err(RecommendError::Config)?;
        Ok(Self { catalog, config })
    }

    /// The active configuration
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Start a search for the named reference entity
    ///
    /// The pool is shuffled with the configured seed, or a random one.
    pub async fn recommend(&self, reference: &str) -> Result<CandidateStream, RecommendError> {
        let shuffle = match self.config.seed {
            Some(seed) => SeededShuffle::new(seed),
            None => SeededShuffle::random(),
        };
        self.recommend_with(reference, shuffle).await
    }

    /// Start a search with an explicit pool ordering strategy
    ///
    /// Lookup failures for the reference itself are returned here. Nothing
    /// else touches the catalog until the stream is first polled.
    pub async fn recommend_with<S>(
        &self,
        reference: &str,
        shuffle: S,
    ) -> Result<CandidateStream, RecommendError>
    where
        S: PoolShuffle + 'static,
    {
        let entity = self.catalog.entity(reference).await?;
        self.recommend_for(entity, shuffle).await
    }

    /// Start a search for an already fetched reference entity
    pub async fn recommend_for<S>(
        &self,
        reference: EntityRecord,
        shuffle: S,
    ) -> Result<CandidateStream, RecommendError>
    where
        S: PoolShuffle + 'static,
    {
        if reference.types.is_empty() {
            return Err(RecommendError::NoTypes(reference.name));
        }

        let reference_map = multipliers_for(self.catalog.as_ref(), &reference.types).await?;
        let open: BTreeSet<String> = reference_map.weaknesses().map(str::to_string).collect();

        if open.is_empty() {
            info!("{} has no weaknesses, nothing to recommend", reference.name);
            return Ok(stream::empty::<Candidate>().boxed());
        }

        info!(
            "Starting recommendation search for '{}' ({} weaknesses)",
            reference.name,
            open.len()
        );

        let state = SearchState {
            catalog: Arc::clone(&self.catalog),
            config: self.config.clone(),
            shuffle: Box::new(shuffle),
            reference,
            phase: Phase::Seeding,
            pool: Vec::new(),
            cursor: 0,
            memo: HashMap::new(),
            used_lineages: HashSet::new(),
            type_counts: HashMap::new(),
            open,
            covered: BTreeSet::new(),
            immune_covered: BTreeSet::new(),
            accepted_stats: Vec::new(),
            yielded: 0,
        };

        Ok(stream::unfold(state, |mut state| async move {
            let candidate = state.next_candidate().await?;
            Some((candidate, state))
        })
        .boxed())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Seeding,
    Scanning(SearchPass),
    Done,
}

/// Everything the search knows; owned by the stream
struct SearchState<C> {
    catalog: Arc<C>,
    config: RecommenderConfig,
    shuffle: Box<dyn PoolShuffle>,
    reference: EntityRecord,
    phase: Phase,
    pool: Vec<String>,
    cursor: usize,
    /// Resolution result per pool name; `None` marks a failed resolution
    memo: HashMap<String, Option<Arc<Resolved>>>,
    used_lineages: HashSet<String>,
    type_counts: HashMap<String, usize>,
    open: BTreeSet<String>,
    covered: BTreeSet<String>,
    immune_covered: BTreeSet<String>,
    accepted_stats: Vec<[f64; STAT_COUNT]>,
    yielded: usize,
}

/// Coverage a candidate offers against the open weaknesses
struct Coverage {
    covers: Vec<String>,
    immune: Vec<String>,
}

impl<C: Catalog + 'static> SearchState<C> {
    async fn next_candidate(&mut self) -> Option<Candidate> {
        loop {
            if self.yielded >= self.config.max_results {
                self.phase = Phase::Done;
            }

            match self.phase {
                Phase::Done => return None,
                Phase::Seeding => {
                    self.seed().await;
                    self.enter(SearchPass::NewCoverage);
                }
                Phase::Scanning(pass) => {
                    let Some(name) = self.pool.get(self.cursor).cloned() else {
                        self.advance(pass);
                        continue;
                    };

                    let Some(resolved) = self.resolve(&name).await else {
                        self.pool.remove(self.cursor);
                        continue;
                    };

                    match self.evaluate(pass, &resolved) {
                        Some(candidate) => {
                            self.pool.remove(self.cursor);
                            self.accept(&resolved);
                            info!(
                                "Recommending {} ({}, score {:.2})",
                                candidate.name,
                                pass.as_str(),
                                candidate.score
                            );
                            return Some(candidate);
                        }
                        None => self.cursor += 1,
                    }
                }
            }
        }
    }

    fn enter(&mut self, pass: SearchPass) {
        debug!("Entering {} pass with {} pool entries", pass.as_str(), self.pool.len());
        self.phase = Phase::Scanning(pass);
        self.cursor = 0;
    }

    fn advance(&mut self, finished: SearchPass) {
        match finished {
            SearchPass::NewCoverage => self.enter(SearchPass::AnyCoverage),
            SearchPass::AnyCoverage if self.config.diversity_pass => {
                self.enter(SearchPass::Diversity)
            }
            _ => {
                info!("Search finished after {} recommendations", self.yielded);
                self.phase = Phase::Done;
            }
        }
    }

    /// Build the shuffled pool from the weak-against types
    async fn seed(&mut self) {
        if let Some(lineage_ref) = self.reference.lineage_ref.clone() {
            match self.catalog.lineage(&lineage_ref).await {
                Ok(chain) => {
                    self.used_lineages.insert(chain.id);
                }
                Err(e) => warn!("Could not resolve lineage of {}: {}", self.reference.name, e),
            }
        }

        let mut seen = HashSet::new();
        let weak_types: Vec<String> = self.open.iter().cloned().collect();
        for weak_type in &weak_types {
            match self
                .catalog
                .entities_by_type(weak_type, self.config.pool_sample_per_type)
                .await
            {
                Ok(names) => {
                    for name in names {
                        if name != self.reference.name && seen.insert(name.clone()) {
                            self.pool.push(name);
                        }
                    }
                }
                Err(e) => warn!("Skipping {} entities for the pool: {}", weak_type, e),
            }
        }

        self.shuffle.shuffle(&mut self.pool);
        debug!("Seeded pool with {} entries", self.pool.len());
    }

    async fn resolve(&mut self, name: &str) -> Option<Arc<Resolved>> {
        if let Some(cached) = self.memo.get(name) {
            return cached.clone();
        }

        let resolved = match resolve_final_form(self.catalog.as_ref(), name).await {
            Ok(resolved) => Some(Arc::new(resolved)),
            Err(e) => {
                warn!("Skipping candidate {}: {}", name, e);
                None
            }
        };
        self.memo.insert(name.to_string(), resolved.clone());
        resolved
    }

    fn admissible(&self, resolved: &Resolved) -> bool {
        if self.used_lineages.contains(&resolved.lineage_id) {
            debug!("{} rejected: lineage {} already used", resolved.entity.name, resolved.lineage_id);
            return false;
        }
        let capped = resolved
            .entity
            .types
            .iter()
            .find(|t| self.type_counts.get(*t).copied().unwrap_or(0) >= self.config.type_cap);
        if let Some(t) = capped {
            debug!("{} rejected: type {} at cap", resolved.entity.name, t);
            return false;
        }
        true
    }

    fn coverage(&self, multipliers: &MultiplierMap) -> Coverage {
        let covers: Vec<String> = self
            .open
            .iter()
            .filter(|t| multipliers.covers(t))
            .cloned()
            .collect();
        let immune = covers
            .iter()
            .filter(|t| multipliers.is_immune_to(t))
            .cloned()
            .collect();
        Coverage { covers, immune }
    }

    fn evaluate(&self, pass: SearchPass, resolved: &Resolved) -> Option<Candidate> {
        if !self.admissible(resolved) {
            return None;
        }

        let weakness_count = resolved.multipliers.weakness_count();
        let individual = resolved.individual_score;

        let (newly_covered, immune_to, score) = match pass {
            SearchPass::NewCoverage => {
                let coverage = self.coverage(&resolved.multipliers);
                let new: Vec<String> = coverage
                    .covers
                    .iter()
                    .filter(|t| !self.covered.contains(*t))
                    .cloned()
                    .collect();
                let new_immune = coverage
                    .immune
                    .iter()
                    .filter(|t| !self.immune_covered.contains(*t))
                    .count();
                if new.is_empty() && new_immune == 0 {
                    return None;
                }
                let new_resisted = new
                    .iter()
                    .filter(|t| !resolved.multipliers.is_immune_to(t))
                    .count();
                let score = new_immune as f64 * 3.0
                    + new_resisted as f64
                    + coverage.immune.len() as f64 * 1.5
                    + individual * 2.0
                    - weakness_count as f64 * 0.5;
                (new, coverage.immune, score)
            }
            SearchPass::AnyCoverage => {
                let coverage = self.coverage(&resolved.multipliers);
                if coverage.covers.is_empty() {
                    return None;
                }
                let resisted = coverage.covers.len() - coverage.immune.len();
                let score = coverage.immune.len() as f64 * 1.5
                    + resisted as f64 * 0.5
                    + individual * 2.0
                    - weakness_count as f64 * 0.25;
                let new = coverage
                    .covers
                    .iter()
                    .filter(|t| !self.covered.contains(*t))
                    .cloned()
                    .collect();
                (new, coverage.immune, score)
            }
            SearchPass::Diversity => {
                let stats = resolved.entity.stats.as_vector();
                let mean = mean_vector(&self.accepted_stats)
                    .unwrap_or_else(|| self.reference.stats.as_vector());
                let distance = squared_distance(&stats, &mean);
                if distance <= 0.0 {
                    return None;
                }
                let score = (distance / DIVERSITY_STEP).floor().min(DIVERSITY_MAX);
                (Vec::new(), Vec::new(), score)
            }
        };

        Some(Candidate {
            name: resolved.entity.name.clone(),
            sprite: resolved.entity.sprite.clone(),
            types: resolved.entity.types.clone(),
            lineage_id: resolved.lineage_id.clone(),
            newly_covered,
            immune_to,
            multipliers: resolved.multipliers.clone(),
            weakness_count,
            individual_score: individual,
            score: score.max(0.0),
            pass,
        })
    }

    fn accept(&mut self, resolved: &Resolved) {
        let coverage = self.coverage(&resolved.multipliers);
        self.covered.extend(coverage.covers);
        self.immune_covered.extend(coverage.immune);
        self.open
            .extend(resolved.multipliers.weaknesses().map(str::to_string));

        self.used_lineages.insert(resolved.lineage_id.clone());
        for t in &resolved.entity.types {
            *self.type_counts.entry(t.clone()).or_insert(0) += 1;
        }
        self.accepted_stats.push(resolved.entity.stats.as_vector());
        self.yielded += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::NoShuffle;
    use typecover_catalog::MockCatalog;
    use typecover_domain::{BaseStats, LineageChain, TypeInteraction};

    fn stats(hp: u32, attack: u32, defense: u32) -> BaseStats {
        BaseStats {
            hp,
            attack,
            defense,
            special_attack: 60,
            special_defense: 60,
            speed: 60,
        }
    }

    fn recommender(catalog: &MockCatalog, config: RecommenderConfig) -> Recommender<MockCatalog> {
        Recommender::new(Arc::new(catalog.clone()), config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let catalog = MockCatalog::new();
        let config = RecommenderConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(matches!(
            Recommender::new(Arc::new(catalog), config),
            Err(RecommendError::Config(_))
        ));
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    /// Invented types all carry weight 1 and none are common, so every
    /// bucket contributes its base points plus one weight unit.
    fn scoring_world() -> MockCatalog {
        let catalog = MockCatalog::new();
        catalog.add_type(TypeInteraction::new("core").with_double_from(&["blaze", "frost"]));
        catalog.add_type(
            TypeInteraction::new("blaze")
                .with_no_damage_from(&["blaze"])
                .with_half_from(&["frost"])
                .with_double_from(&["tide"]),
        );
        catalog.add_type(
            TypeInteraction::new("frost")
                .with_half_from(&["frost"])
                .with_double_from(&["spark", "volt", "gloom"]),
        );
        catalog.add_type(
            TypeInteraction::new("mire").with_double_from(&["rust", "dust", "husk", "moss", "silt"]),
        );

        catalog.add_entity(EntityRecord::new(1, "hero", &["core"]));
        catalog.add_entity(EntityRecord::new(2, "warden", &["blaze"]));
        catalog.add_entity(EntityRecord::new(3, "glacier", &["frost"]));
        catalog.add_entity(EntityRecord::new(4, "sludge", &["frost", "mire"]));
        catalog
    }

    #[tokio::test]
    async fn test_coverage_pass_scores() {
        let catalog = scoring_world();
        let picks: Vec<Candidate> = recommender(&catalog, RecommenderConfig::default())
            .recommend_with("hero", NoShuffle)
            .await
            .unwrap()
            .collect()
            .await;

        let names: Vec<&str> = picks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["warden", "glacier", "sludge"]);

        // warden: defense 13 (blaze immunity) + 2.5 (frost resist), weakness 6.5 (tide)
        let warden = &picks[0];
        assert_eq!(warden.pass, SearchPass::NewCoverage);
        assert_eq!(warden.newly_covered, vec!["blaze", "frost"]);
        assert_eq!(warden.immune_to, vec!["blaze"]);
        assert_eq!(warden.weakness_count, 1);
        assert_close(warden.individual_score, 155.0 / 22.0);
        // new immunity 3 + new resist 1 + immunity 1.5 + 2 * individual - 0.5 per weakness
        assert_close(warden.score, 3.0 + 1.0 + 1.5 + 2.0 * 155.0 / 22.0 - 0.5);

        // glacier only repeats frost, so it waits for the second pass
        let glacier = &picks[1];
        assert_eq!(glacier.pass, SearchPass::AnyCoverage);
        assert!(glacier.newly_covered.is_empty());
        assert!(glacier.immune_to.is_empty());
        assert_eq!(glacier.weakness_count, 3);
        assert_close(glacier.individual_score, 25.0 / 22.0);
        // resist 0.5 + 2 * individual - 0.25 per weakness
        assert_close(glacier.score, 0.5 + 2.0 * 25.0 / 22.0 - 3.0 * 0.25);

        // eight weaknesses drag the raw value below zero
        let sludge = &picks[2];
        assert_eq!(sludge.pass, SearchPass::AnyCoverage);
        assert_eq!(sludge.weakness_count, 8);
        assert_close(sludge.individual_score, 25.0 / 54.5);
        assert!(0.5 + 2.0 * sludge.individual_score - 8.0 * 0.25 < 0.0);
        assert_eq!(sludge.score, 0.0);
    }

    #[tokio::test]
    async fn test_diversity_uses_reference_stats_before_any_pick() {
        let catalog = MockCatalog::with_standard_types();
        // Normal is weak to fighting; plain fighting types cover nothing.
        catalog.add_entity(EntityRecord::new(143, "snorlax", &["normal"]).with_stats(stats(160, 110, 65)));
        catalog.add_entity(EntityRecord::new(66, "machop", &["fighting"]).with_stats(stats(70, 80, 50)));
        catalog.add_entity(EntityRecord::new(67, "clone", &["fighting"]).with_stats(stats(160, 110, 65)));

        let stream = recommender(&catalog, RecommenderConfig::default())
            .recommend_with("snorlax", NoShuffle)
            .await
            .unwrap();
        let picks: Vec<Candidate> = stream.collect().await;

        // machop differs from the reference, then clone differs from machop
        assert_eq!(picks.len(), 2);
        assert!(picks.iter().all(|c| c.pass == SearchPass::Diversity));
        assert!(picks.iter().all(|c| c.newly_covered.is_empty() && c.immune_to.is_empty()));
        assert_eq!(picks[0].name, "machop");
        // (90^2 + 30^2 + 15^2) / 120 is well above the cap
        assert_eq!(picks[0].score, 2.0);
    }

    #[tokio::test]
    async fn test_diversity_pass_can_be_disabled() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(143, "snorlax", &["normal"]).with_stats(stats(160, 110, 65)));
        catalog.add_entity(EntityRecord::new(66, "machop", &["fighting"]).with_stats(stats(70, 80, 50)));

        let stream = recommender(&catalog, RecommenderConfig::coverage_only())
            .recommend_with("snorlax", NoShuffle)
            .await
            .unwrap();
        assert!(stream.collect::<Vec<_>>().await.is_empty());
    }

    #[tokio::test]
    async fn test_identical_stats_not_diverse() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(143, "snorlax", &["normal"]).with_stats(stats(160, 110, 65)));
        catalog.add_entity(EntityRecord::new(67, "twin", &["fighting"]).with_stats(stats(160, 110, 65)));

        let stream = recommender(&catalog, RecommenderConfig::default())
            .recommend_with("snorlax", NoShuffle)
            .await
            .unwrap();
        assert!(stream.collect::<Vec<_>>().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_candidate_resolved_once() {
        let catalog = MockCatalog::with_standard_types();
        catalog.add_entity(EntityRecord::new(143, "snorlax", &["normal"]));
        catalog.add_entity(EntityRecord::new(66, "machop", &["fighting"]).with_lineage("machop"));
        catalog.add_lineage("machop", LineageChain::new("28", &["machop", "machoke", "machamp"]));

        let stream = recommender(&catalog, RecommenderConfig::default())
            .recommend_with("snorlax", NoShuffle)
            .await
            .unwrap();
        catalog.reset_call_count();
        let picks: Vec<Candidate> = stream.collect().await;

        assert!(picks.is_empty());
        // pool listing, then entity, lineage and the missing final form once
        assert_eq!(catalog.call_count(), 4);
    }
}
