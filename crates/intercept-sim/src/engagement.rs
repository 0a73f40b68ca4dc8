//! Kill-chain state machine.
//!
//! SEARCH → TRACK → CLASSIFY → LAUNCH → MIDCOURSE → TERMINAL → COMPLETE.
//! Each tick runs exactly one phase handler, and at most one transition
//! happens per tick. Phases never repeat and never move backward. A failed
//! detection or classification roll simply repeats the phase next tick.

use glam::DVec2;
use rand::Rng;
use tracing::{debug, info};

use intercept_core::constants::*;
use intercept_core::enums::{EngagementResult, InterceptorState, Phase, TerminalGuidance};
use intercept_core::state::PhaseTransition;
use intercept_core::types::{bearing, distance};

use crate::guidance;
use crate::models::{Interceptor, Target};
use crate::sensor::{Sensor, SensorMeasurement};
use crate::tracking::{ClassificationState, TrackState};

/// Engagement doctrine: terminal law and midcourse geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementParams {
    pub terminal_guidance: TerminalGuidance,
    /// Proportional navigation constant, typically 3–5.
    pub nav_gain: f64,
    /// Estimated range at which midcourse hands over to terminal (m).
    pub terminal_handover_range: f64,
    /// Distance behind the target for the stern approach (m). 0 disables it.
    pub stern_offset: f64,
    /// Range over which the stern aim point slides onto the target (m).
    pub approach_blend_range: f64,
}

impl Default for EngagementParams {
    fn default() -> Self {
        Self {
            terminal_guidance: TerminalGuidance::default(),
            nav_gain: DEFAULT_NAV_GAIN,
            terminal_handover_range: DEFAULT_TERMINAL_HANDOVER_RANGE,
            stern_offset: DEFAULT_STERN_OFFSET,
            approach_blend_range: DEFAULT_APPROACH_BLEND_RANGE,
        }
    }
}

/// Drives one interceptor against one target through the kill chain.
///
/// The manager owns the track and classification state and the latest
/// sensor estimate. Target, interceptor and the random source are borrowed
/// from the engine for the duration of each step.
#[derive(Debug, Clone)]
pub struct EngagementManager {
    surveillance_sensor: Sensor,
    sensor_position: DVec2,
    params: EngagementParams,

    phase: Phase,
    result: EngagementResult,
    track: TrackState,
    classification: ClassificationState,
    phase_log: Vec<PhaseTransition>,

    latest_measurement: Option<SensorMeasurement>,
}

impl EngagementManager {
    pub fn new(
        target_id: impl Into<String>,
        surveillance_sensor: Sensor,
        sensor_position: DVec2,
        params: EngagementParams,
    ) -> Self {
        Self {
            surveillance_sensor,
            sensor_position,
            params,
            phase: Phase::Search,
            result: EngagementResult::Pending,
            track: TrackState::new(target_id),
            classification: ClassificationState::default(),
            phase_log: Vec::new(),
            latest_measurement: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> EngagementResult {
        self.result
    }

    /// Ordered audit trail of phase entries.
    pub fn phase_log(&self) -> &[PhaseTransition] {
        &self.phase_log
    }

    pub fn track(&self) -> &TrackState {
        &self.track
    }

    pub fn classification(&self) -> &ClassificationState {
        &self.classification
    }

    pub fn params(&self) -> &EngagementParams {
        &self.params
    }

    pub fn surveillance_sensor(&self) -> &Sensor {
        &self.surveillance_sensor
    }

    pub fn sensor_position(&self) -> DVec2 {
        self.sensor_position
    }

    /// Most recent midcourse measurement.
    pub fn latest_measurement(&self) -> Option<&SensorMeasurement> {
        self.latest_measurement.as_ref()
    }

    /// Estimated target position from the latest midcourse measurement.
    pub fn estimated_target_pos(&self) -> Option<DVec2> {
        self.latest_measurement.map(|m| m.estimated_position)
    }

    /// Estimated target velocity from the latest midcourse measurement.
    pub fn estimated_target_vel(&self) -> Option<DVec2> {
        self.latest_measurement.map(|m| m.estimated_velocity)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Advance the kill chain by one tick at time `t`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        t: f64,
        dt: f64,
        target: &mut Target,
        interceptor: &mut Interceptor,
        rng: &mut R,
    ) {
        match self.phase {
            Phase::Search => self.step_search(t, target, rng),
            Phase::Track => self.step_track(t, target, rng),
            Phase::Classify => self.step_classify(t, rng),
            Phase::Launch => self.step_launch(t, target, interceptor),
            Phase::Midcourse => self.step_midcourse(t, dt, target, interceptor, rng),
            Phase::Terminal => self.step_terminal(t, dt, target, interceptor),
            Phase::Complete => {}
        }
    }

    fn transition(&mut self, new_phase: Phase, t: f64) {
        debug!(time = t, from = %self.phase, to = %new_phase, "phase transition");
        self.phase_log.push(PhaseTransition {
            time: t,
            phase: new_phase,
        });
        self.phase = new_phase;
    }

    fn complete(&mut self, result: EngagementResult, t: f64) {
        self.result = result;
        self.transition(Phase::Complete, t);
        info!(time = t, result = %result, "engagement complete");
    }

    fn roll_detection<R: Rng + ?Sized>(&mut self, target: &Target, rng: &mut R) {
        let detected =
            self.surveillance_sensor
                .try_detect(self.sensor_position, target.position(), rng);
        self.track.process_detection(detected);
    }

    fn step_search<R: Rng + ?Sized>(&mut self, t: f64, target: &Target, rng: &mut R) {
        self.roll_detection(target, rng);
        if self.track.detected() {
            self.transition(Phase::Track, t);
        }
    }

    fn step_track<R: Rng + ?Sized>(&mut self, t: f64, target: &Target, rng: &mut R) {
        self.roll_detection(target, rng);
        if self.track.track_confirmed() {
            self.transition(Phase::Classify, t);
        }
    }

    fn step_classify<R: Rng + ?Sized>(&mut self, t: f64, rng: &mut R) {
        self.classification.process_look(&self.surveillance_sensor, rng);
        if self.classification.classified() {
            self.transition(Phase::Launch, t);
        }
    }

    fn step_launch(&mut self, t: f64, target: &Target, interceptor: &mut Interceptor) {
        let heading = bearing(interceptor.position(), target.position());
        interceptor.launch(heading);
        debug!(time = t, heading, "interceptor launched");
        self.transition(Phase::Midcourse, t);
    }

    fn step_midcourse<R: Rng + ?Sized>(
        &mut self,
        t: f64,
        dt: f64,
        target: &Target,
        interceptor: &mut Interceptor,
        rng: &mut R,
    ) {
        if interceptor.state() == InterceptorState::Missed {
            self.complete(EngagementResult::Miss, t);
            return;
        }

        let measurement = self.surveillance_sensor.measure(
            self.sensor_position,
            target.position(),
            target.speed(),
            target.heading(),
            rng,
        );
        self.latest_measurement = Some(measurement);

        let command = guidance::command_guidance(
            measurement.estimated_position,
            interceptor.position(),
            Some(measurement.estimated_velocity),
            self.params.stern_offset,
            self.params.approach_blend_range,
        );
        interceptor.apply_guidance(command, dt);

        let estimated_range = distance(interceptor.position(), measurement.estimated_position);
        if estimated_range <= self.params.terminal_handover_range {
            interceptor.enter_terminal();
            debug!(time = t, estimated_range, "terminal handover");
            self.transition(Phase::Terminal, t);
        }
    }

    /// Terminal guidance runs on true geometry: the seeker is assumed to
    /// resolve the target exactly inside handover range.
    ///
    /// The kill check comes before the flight-time check. A target inside
    /// the kill radius on the tick the budget runs out is still a HIT; the
    /// interceptor stays MISSED because detonation is only legal in flight.
    fn step_terminal(
        &mut self,
        t: f64,
        dt: f64,
        target: &mut Target,
        interceptor: &mut Interceptor,
    ) {
        if interceptor.check_intercept(target.position()) {
            interceptor.detonate();
            target.deactivate();
            self.complete(EngagementResult::Hit, t);
            return;
        }

        if interceptor.state() == InterceptorState::Missed {
            self.complete(EngagementResult::Miss, t);
            return;
        }

        let command = guidance::terminal_command(
            self.params.terminal_guidance,
            interceptor.position(),
            interceptor.velocity(),
            target.position(),
            target.velocity(),
            self.params.nav_gain,
        );
        interceptor.apply_guidance(command, dt);
    }
}
