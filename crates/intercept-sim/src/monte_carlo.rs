//! Batch Monte Carlo over seeds.
//!
//! Every seed gets its own engine and its own generator, so runs share
//! nothing and can execute on the rayon pool. Outcomes come back in seed
//! order and match what a sequential loop would produce.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use intercept_core::enums::EngagementResult;

use crate::error::ScenarioError;
use crate::scenario::ScenarioConfig;

/// Result of one seeded run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub seed: u64,
    pub result: EngagementResult,
    pub duration_secs: f64,
    pub closest_approach: f64,
}

/// Aggregate over a batch of seeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<RunOutcome>,
    pub hits: usize,
    pub misses: usize,
    /// Runs that hit `max_time` with the engagement still pending.
    pub unresolved: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<RunOutcome>) -> Self {
        let count = |r: EngagementResult| outcomes.iter().filter(|o| o.result == r).count();
        let hits = count(EngagementResult::Hit);
        let misses = count(EngagementResult::Miss);
        let unresolved = outcomes.iter().filter(|o| !o.result.is_resolved()).count();
        Self {
            outcomes,
            hits,
            misses,
            unresolved,
        }
    }

    pub fn runs(&self) -> usize {
        self.outcomes.len()
    }

    /// Fraction of runs that ended in a HIT. Zero for an empty batch.
    pub fn hit_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.hits as f64 / self.outcomes.len() as f64
    }
}

/// Build and run one engine for `seed`.
pub fn run_single(config: &ScenarioConfig, seed: u64) -> Result<RunOutcome, ScenarioError> {
    let mut engine = config.build(seed)?;
    engine.run();
    let summary = engine.summary();
    Ok(RunOutcome {
        seed,
        result: summary.result,
        duration_secs: summary.duration_secs,
        closest_approach: summary.closest_approach,
    })
}

/// Run `config` once per seed in parallel.
pub fn run_batch(config: &ScenarioConfig, seeds: &[u64]) -> Result<BatchReport, ScenarioError> {
    config.validate()?;

    let outcomes = seeds
        .par_iter()
        .map(|&seed| run_single(config, seed))
        .collect::<Result<Vec<_>, _>>()?;

    let report = BatchReport::from_outcomes(outcomes);
    info!(
        runs = report.runs(),
        hits = report.hits,
        misses = report.misses,
        unresolved = report.unresolved,
        hit_rate = report.hit_rate(),
        "batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_empty_batch() {
        let report = run_batch(&ScenarioConfig::default(), &[]).unwrap();
        assert_eq!(report.runs(), 0);
        assert_eq!(report.hit_rate(), 0.0);
    }

    #[test]
    fn test_counts_partition_runs() {
        let seeds: Vec<u64> = (0..8).collect();
        let report = run_batch(&ScenarioConfig::default(), &seeds).unwrap();
        assert_eq!(report.runs(), 8);
        assert_eq!(report.hits + report.misses + report.unresolved, 8);
        assert!((0.0..=1.0).contains(&report.hit_rate()));
    }

    #[test]
    fn test_outcomes_in_seed_order() {
        let seeds = [9, 3, 27, 1];
        let report = run_batch(&ScenarioConfig::default(), &seeds).unwrap();
        let order: Vec<u64> = report.outcomes.iter().map(|o| o.seed).collect();
        assert_eq!(order, seeds);
    }

    #[test]
    fn test_target_outside_coverage_is_unresolved() {
        let mut config = ScenarioConfig::default();
        config.target.position = DVec2::new(9000.0, 0.0);
        config.target.waypoints.clear();
        config.target.speed = 0.0;
        config.simulation.max_time = 2.0;

        let report = run_batch(&config, &[1, 2, 3]).unwrap();
        assert_eq!(report.unresolved, 3);
        assert_eq!(report.hits + report.misses, 0);
        assert!(report.outcomes.iter().all(|o| o.result == EngagementResult::Pending));
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let mut config = ScenarioConfig::default();
        config.simulation.dt = 0.0;
        assert!(matches!(
            run_batch(&config, &[1, 2]),
            Err(ScenarioError::InvalidParameter { field: "simulation.dt", .. })
        ));
    }
}
