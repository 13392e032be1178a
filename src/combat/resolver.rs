//! Combat resolver: battle simulation plus cached Monte Carlo odds

use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::dice::{self, BattleResult};
use crate::combat::odds::OddsCache;
use crate::core::config::CombatConfig;

/// Resolves battles and estimates their odds
///
/// One resolver is meant to be shared (behind an `Arc`) by every game in the
/// process so the odds cache is built once. Estimates are deterministic for
/// a given seed: each pair gets its own RNG derived from the base seed.
#[derive(Debug)]
pub struct CombatResolver {
    trials: u32,
    seed: u64,
    cache: OddsCache,
    simulations: AtomicU64,
}

impl CombatResolver {
    pub fn new(config: &CombatConfig) -> Self {
        Self::with_trials(config.trials, config.seed)
    }

    /// Resolver with an explicit trial count and seed
    pub fn with_trials(trials: u32, seed: u64) -> Self {
        Self {
            trials: trials.max(1),
            seed,
            cache: OddsCache::new(),
            simulations: AtomicU64::new(0),
        }
    }

    /// Fight a full battle with the caller's RNG
    pub fn simulate_battle<R: Rng + ?Sized>(
        &self,
        attackers: u32,
        defenders: u32,
        rng: &mut R,
    ) -> BattleResult {
        dice::simulate_battle(attackers, defenders, rng)
    }

    /// Probability that `attackers` wipe out `defenders` in a full battle
    ///
    /// Decided inputs (no defenders, or an attacker that cannot roll) are
    /// answered directly; everything else is estimated once and cached.
    pub fn win_probability(&self, attackers: u32, defenders: u32) -> f64 {
        if defenders == 0 {
            return 1.0;
        }
        if attackers <= 1 {
            return 0.0;
        }

        self.cache
            .get_or_compute((attackers, defenders), || self.estimate(attackers, defenders))
    }

    fn estimate(&self, attackers: u32, defenders: u32) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(pair_stream(attackers, defenders));

        let wins = (0..self.trials)
            .filter(|_| dice::simulate_battle(attackers, defenders, &mut rng).attacker_won())
            .count();

        self.simulations
            .fetch_add(u64::from(self.trials), Ordering::Relaxed);

        let probability = wins as f64 / f64::from(self.trials);
        tracing::trace!(attackers, defenders, probability, "estimated battle odds");
        probability
    }

    /// Total battles simulated for estimates so far
    pub fn simulations_run(&self) -> u64 {
        self.simulations.load(Ordering::Relaxed)
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Number of cached estimates
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Forget all cached estimates
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}

/// Stream id for a pair; distinct pairs never share a stream
fn pair_stream(attackers: u32, defenders: u32) -> u64 {
    (u64::from(attackers) << 32) | u64::from(defenders)
}
