//! Recorded simulation state: the read-only output handed to reporting.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{EngagementResult, Phase};

/// Snapshot of the engagement at one tick. A frozen copy of live state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub time: f64,
    pub target_pos: DVec2,
    pub interceptor_pos: DVec2,
    pub phase: Phase,
    pub target_active: bool,
    pub interceptor_speed: f64,
    /// Latest midcourse estimate of the target position, if any.
    pub estimated_target_pos: Option<DVec2>,
    /// Latest midcourse estimate of the target velocity, if any.
    pub estimated_target_vel: Option<DVec2>,
}

/// A phase entry in the engagement audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Tick time at which the phase was entered.
    pub time: f64,
    pub phase: Phase,
}

/// Contiguous span of history spent in one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseInterval {
    pub start: f64,
    pub end: f64,
    pub phase: Phase,
}

/// Append-only, time-ordered sequence of snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimHistory {
    states: Vec<SimState>,
}

/// End-of-run engagement metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub result: EngagementResult,
    /// Time of the last recorded snapshot.
    pub duration_secs: f64,
    /// Target–interceptor separation at the last snapshot.
    pub final_range: f64,
    /// Smallest recorded target–interceptor separation.
    pub closest_approach: f64,
    pub phase_log: Vec<PhaseTransition>,
}

impl SimState {
    /// Separation between target and interceptor.
    pub fn range(&self) -> f64 {
        self.target_pos.distance(self.interceptor_pos)
    }
}

impl SimHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot.
    pub fn record(&mut self, state: SimState) {
        self.states.push(state);
    }

    pub fn states(&self) -> &[SimState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn last(&self) -> Option<&SimState> {
        self.states.last()
    }

    pub fn times(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.time).collect()
    }

    pub fn target_positions(&self) -> Vec<DVec2> {
        self.states.iter().map(|s| s.target_pos).collect()
    }

    pub fn interceptor_positions(&self) -> Vec<DVec2> {
        self.states.iter().map(|s| s.interceptor_pos).collect()
    }

    /// Target–interceptor separation per snapshot.
    pub fn ranges(&self) -> Vec<f64> {
        self.states.iter().map(SimState::range).collect()
    }

    /// Smallest recorded separation, or `None` for an empty history.
    pub fn closest_approach(&self) -> Option<f64> {
        self.states.iter().map(SimState::range).reduce(f64::min)
    }

    /// Collapse the history into contiguous per-phase spans.
    pub fn phase_intervals(&self) -> Vec<PhaseInterval> {
        let mut intervals = Vec::new();
        let Some(first) = self.states.first() else {
            return intervals;
        };

        let mut current = first.phase;
        let mut start = first.time;
        for state in &self.states[1..] {
            if state.phase != current {
                intervals.push(PhaseInterval {
                    start,
                    end: state.time,
                    phase: current,
                });
                current = state.phase;
                start = state.time;
            }
        }
        if let Some(last) = self.states.last() {
            intervals.push(PhaseInterval {
                start,
                end: last.time,
                phase: current,
            });
        }
        intervals
    }
}
