//! Interceptor drone: launch, turn-rate-limited steering, flight-time budget.

use glam::DVec2;

use intercept_core::constants::*;
use intercept_core::enums::InterceptorState;
use intercept_core::types::{distance, wrap_angle};

use crate::entity::Entity;
use crate::sensor::Sensor;

/// Flight performance parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptorParams {
    /// Speed after launch (m/s).
    pub max_speed: f64,
    /// Maximum heading change rate (rad/s).
    pub max_turn_rate: f64,
    /// Intercept succeeds inside this distance (m).
    pub kill_radius: f64,
    /// Endurance (s).
    pub max_flight_time: f64,
}

impl Default for InterceptorParams {
    fn default() -> Self {
        Self {
            max_speed: INTERCEPTOR_DEFAULT_MAX_SPEED,
            max_turn_rate: INTERCEPTOR_DEFAULT_MAX_TURN_RATE,
            kill_radius: INTERCEPTOR_DEFAULT_KILL_RADIUS,
            max_flight_time: INTERCEPTOR_DEFAULT_MAX_FLIGHT_TIME,
        }
    }
}

/// Interceptor with lifecycle READY → LAUNCHED → TERMINAL → DETONATED | MISSED.
///
/// Lifecycle calls that are not legal from the current state are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Interceptor {
    entity: Entity,
    params: InterceptorParams,
    /// Onboard seeker. Terminal guidance currently resolves true geometry.
    seeker: Sensor,
    state: InterceptorState,
    flight_time: f64,
}

impl Interceptor {
    pub fn new(
        position: DVec2,
        params: InterceptorParams,
        seeker: Sensor,
        name: impl Into<String>,
    ) -> Self {
        Self {
            entity: Entity::new(position, 0.0, 0.0, name),
            params,
            seeker,
            state: InterceptorState::Ready,
            flight_time: 0.0,
        }
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn position(&self) -> DVec2 {
        self.entity.position()
    }

    pub fn velocity(&self) -> DVec2 {
        self.entity.velocity()
    }

    pub fn speed(&self) -> f64 {
        self.entity.speed()
    }

    pub fn heading(&self) -> f64 {
        self.entity.heading()
    }

    pub fn is_active(&self) -> bool {
        self.entity.active
    }

    pub fn params(&self) -> &InterceptorParams {
        &self.params
    }

    pub fn seeker(&self) -> &Sensor {
        &self.seeker
    }

    pub fn state(&self) -> InterceptorState {
        self.state
    }

    pub fn flight_time(&self) -> f64 {
        self.flight_time
    }

    /// Leave the launcher at full speed on `heading`. Only legal from READY.
    pub fn launch(&mut self, heading: f64) {
        if self.state != InterceptorState::Ready {
            return;
        }
        self.state = InterceptorState::Launched;
        self.entity.kinematics.heading = wrap_angle(heading);
        self.entity.kinematics.speed = self.params.max_speed;
        self.flight_time = 0.0;
    }

    /// Hand over from midcourse to terminal guidance. Only legal from LAUNCHED.
    pub fn enter_terminal(&mut self) {
        if self.state == InterceptorState::Launched {
            self.state = InterceptorState::Terminal;
        }
    }

    /// Fire the warhead. Only legal while in flight.
    pub fn detonate(&mut self) {
        if self.state.is_in_flight() {
            self.state = InterceptorState::Detonated;
            self.entity.active = false;
        }
    }

    /// Steer toward `commanded_heading`, limited to `max_turn_rate * dt`.
    ///
    /// No-op unless the interceptor is in flight.
    pub fn apply_guidance(&mut self, commanded_heading: f64, dt: f64) {
        if !self.state.is_in_flight() {
            return;
        }
        let heading = self.entity.kinematics.heading;
        let error = wrap_angle(commanded_heading - heading);
        let max_delta = self.params.max_turn_rate * dt;
        let delta = error.clamp(-max_delta, max_delta);
        self.entity.kinematics.heading = wrap_angle(heading + delta);
    }

    /// Whether `target_pos` lies inside the kill radius.
    pub fn check_intercept(&self, target_pos: DVec2) -> bool {
        distance(self.entity.position(), target_pos) <= self.params.kill_radius
    }

    /// Burn flight time and advance. Exhausting the budget ends the flight as MISSED.
    pub fn update(&mut self, dt: f64) {
        if !self.state.is_in_flight() {
            if self.state.is_finished() {
                self.entity.active = false;
            }
            return;
        }

        self.flight_time += dt;
        if self.flight_time >= self.params.max_flight_time {
            self.state = InterceptorState::Missed;
            self.entity.kinematics.speed = 0.0;
            self.entity.active = false;
            return;
        }

        self.entity.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn interceptor() -> Interceptor {
        Interceptor::new(
            DVec2::ZERO,
            InterceptorParams {
                max_speed: 100.0,
                max_turn_rate: 0.5,
                kill_radius: 10.0,
                max_flight_time: 2.0,
            },
            Sensor::seeker(),
            "int",
        )
    }

    #[test]
    fn test_ready_interceptor_does_not_move() {
        let mut int = interceptor();
        int.update(1.0);
        assert_eq!(int.position(), DVec2::ZERO);
        assert_eq!(int.speed(), 0.0);
        assert_eq!(int.state(), InterceptorState::Ready);
    }

    #[test]
    fn test_launch_sets_speed_and_heading() {
        let mut int = interceptor();
        int.launch(FRAC_PI_2);
        assert_eq!(int.state(), InterceptorState::Launched);
        assert_eq!(int.speed(), 100.0);
        int.update(0.5);
        assert!((int.position().y - 50.0).abs() < 1e-9);
        assert!((int.flight_time() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_second_launch_is_ignored() {
        let mut int = interceptor();
        int.launch(0.0);
        int.update(0.5);
        int.launch(FRAC_PI_2);
        assert_eq!(int.heading(), 0.0);
        assert!((int.flight_time() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_turn_rate_is_limited() {
        let mut int = interceptor();
        int.launch(0.0);
        int.apply_guidance(FRAC_PI_2, 0.1);
        assert!((int.heading() - 0.05).abs() < 1e-12);

        int.apply_guidance(-FRAC_PI_2, 0.1);
        assert!(int.heading().abs() < 1e-12);
    }

    #[test]
    fn test_small_correction_is_applied_exactly() {
        let mut int = interceptor();
        int.launch(0.0);
        int.apply_guidance(0.01, 0.1);
        assert!((int.heading() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_guidance_on_ready_interceptor_is_noop() {
        let mut int = interceptor();
        int.apply_guidance(1.0, 1.0);
        assert_eq!(int.heading(), 0.0);
    }

    #[test]
    fn test_flight_time_exhaustion_misses() {
        let mut int = interceptor();
        int.launch(0.0);
        for _ in 0..30 {
            int.update(0.1);
        }
        assert_eq!(int.state(), InterceptorState::Missed);
        assert_eq!(int.speed(), 0.0);
        assert!(!int.is_active());

        let frozen = int.position();
        int.update(0.1);
        assert_eq!(int.position(), frozen);
    }

    #[test]
    fn test_terminal_handover_only_from_launched() {
        let mut int = interceptor();
        int.enter_terminal();
        assert_eq!(int.state(), InterceptorState::Ready);

        int.launch(0.0);
        int.enter_terminal();
        assert_eq!(int.state(), InterceptorState::Terminal);
    }

    #[test]
    fn test_detonation_deactivates() {
        let mut int = interceptor();
        int.detonate();
        assert_eq!(int.state(), InterceptorState::Ready);

        int.launch(0.0);
        int.detonate();
        assert_eq!(int.state(), InterceptorState::Detonated);
        assert!(!int.is_active());
    }

    #[test]
    fn test_check_intercept_uses_kill_radius() {
        let int = interceptor();
        assert!(int.check_intercept(DVec2::new(10.0, 0.0)));
        assert!(!int.check_intercept(DVec2::new(10.1, 0.0)));
    }
}
