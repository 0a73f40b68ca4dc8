//! Simulation engine: the fixed-step loop around one engagement.
//!
//! `SimulationEngine` owns the target, the interceptor, the engagement
//! manager and the only random source of the run. Each tick records a
//! snapshot, moves both entities, then lets the kill chain react. Headless
//! and deterministic: the same seed reproduces the same history.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use intercept_core::constants::{DEFAULT_DT, DEFAULT_MAX_TIME, DEFAULT_SEED};
use intercept_core::enums::{EngagementResult, Phase};
use intercept_core::state::{EngagementSummary, SimHistory, SimState};
use intercept_core::types::SimTime;

use crate::engagement::EngagementManager;
use crate::models::{Interceptor, Target};

/// Configuration for a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same history.
    pub seed: u64,
    /// Fixed tick length in seconds.
    pub dt: f64,
    /// Hard stop on simulated time in seconds.
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            dt: DEFAULT_DT,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

/// The simulation engine. Owns all live state of one engagement.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    target: Target,
    interceptor: Interceptor,
    engagement: EngagementManager,
    rng: ChaCha8Rng,
    dt: f64,
    max_time: f64,
    time: SimTime,
    history: SimHistory,
    launch_position: DVec2,
}

impl SimulationEngine {
    pub fn new(
        target: Target,
        interceptor: Interceptor,
        engagement: EngagementManager,
        config: SimConfig,
    ) -> Self {
        let launch_position = interceptor.position();
        Self {
            target,
            interceptor,
            engagement,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            dt: config.dt,
            max_time: config.max_time,
            time: SimTime::default(),
            history: SimHistory::new(),
            launch_position,
        }
    }

    /// Advance one tick. Returns `false` once the run is over, without
    /// touching any state.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let t = self.time.elapsed_secs;
        self.record_snapshot();

        self.target.update(self.dt);
        self.interceptor.update(self.dt);
        self.engagement.step(
            t,
            self.dt,
            &mut self.target,
            &mut self.interceptor,
            &mut self.rng,
        );

        self.time.advance(self.dt);
        true
    }

    /// Step until the engagement completes or time runs out, then record
    /// one final snapshot.
    pub fn run(&mut self) -> &SimHistory {
        while self.step() {}
        self.record_snapshot();
        info!(
            result = %self.engagement.result(),
            ticks = self.time.tick,
            elapsed = self.time.elapsed_secs,
            "simulation finished"
        );
        &self.history
    }

    /// Whether time is exhausted or the kill chain has completed.
    ///
    /// Elapsed time is `tick * dt` rather than a running sum, so the run
    /// stops on the first tick with `tick * dt >= max_time` (10 ticks for
    /// `dt = 0.1`, `max_time = 1.0`).
    pub fn is_finished(&self) -> bool {
        self.time.elapsed_secs >= self.max_time || self.engagement.phase() == Phase::Complete
    }

    fn record_snapshot(&mut self) {
        let state = SimState {
            time: self.time.elapsed_secs,
            target_pos: self.target.position(),
            interceptor_pos: self.interceptor.position(),
            phase: self.engagement.phase(),
            target_active: self.target.is_active(),
            interceptor_speed: self.interceptor.speed(),
            estimated_target_pos: self.engagement.estimated_target_pos(),
            estimated_target_vel: self.engagement.estimated_target_vel(),
        };
        self.history.record(state);
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn history(&self) -> &SimHistory {
        &self.history
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn interceptor(&self) -> &Interceptor {
        &self.interceptor
    }

    pub fn engagement(&self) -> &EngagementManager {
        &self.engagement
    }

    pub fn result(&self) -> EngagementResult {
        self.engagement.result()
    }

    pub fn sensor_position(&self) -> DVec2 {
        self.engagement.sensor_position()
    }

    /// Interceptor position at construction, before any launch.
    pub fn launch_position(&self) -> DVec2 {
        self.launch_position
    }

    /// The defended point. Co-located with the surveillance sensor.
    pub fn protected_asset_position(&self) -> DVec2 {
        self.sensor_position()
    }

    /// End-of-run metrics from the recorded history.
    pub fn summary(&self) -> EngagementSummary {
        let last = self.history.last();
        EngagementSummary {
            result: self.engagement.result(),
            duration_secs: last.map_or(0.0, |s| s.time),
            final_range: last.map_or_else(
                || self.target.position().distance(self.interceptor.position()),
                |s| s.range(),
            ),
            closest_approach: self
                .history
                .closest_approach()
                .unwrap_or_else(|| self.target.position().distance(self.interceptor.position())),
            phase_log: self.engagement.phase_log().to_vec(),
        }
    }
}
