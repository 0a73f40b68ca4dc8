//! Adversarial UAV following a waypoint path.

use glam::DVec2;

use intercept_core::constants::{TARGET_DEFAULT_RCS, TARGET_DEFAULT_WAYPOINT_THRESHOLD};
use intercept_core::types::{bearing, distance};

use crate::entity::Entity;

/// Waypoint-following target.
///
/// The waypoint index only ever increases. Once every waypoint has been
/// consumed the target holds its last heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    entity: Entity,
    waypoints: Vec<DVec2>,
    current_waypoint: usize,
    waypoint_threshold: f64,
    /// Radar cross-section (m²). Not consulted by the detection law.
    rcs: f64,
}

impl Target {
    /// Create a target heading toward its first waypoint (or along +x if none).
    pub fn new(position: DVec2, speed: f64, waypoints: Vec<DVec2>, name: impl Into<String>) -> Self {
        let heading = waypoints
            .first()
            .map(|wp| bearing(position, *wp))
            .unwrap_or(0.0);
        Self {
            entity: Entity::new(position, speed, heading, name),
            waypoints,
            current_waypoint: 0,
            waypoint_threshold: TARGET_DEFAULT_WAYPOINT_THRESHOLD,
            rcs: TARGET_DEFAULT_RCS,
        }
    }

    pub fn with_waypoint_threshold(mut self, threshold: f64) -> Self {
        self.waypoint_threshold = threshold;
        self
    }

    pub fn with_rcs(mut self, rcs: f64) -> Self {
        self.rcs = rcs;
        self
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

    pub fn rcs(&self) -> f64 {
        self.rcs
    }

    pub fn waypoints(&self) -> &[DVec2] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    /// True once every waypoint has been reached. False for a target with no path.
    pub fn has_reached_final_waypoint(&self) -> bool {
        !self.waypoints.is_empty() && self.current_waypoint >= self.waypoints.len()
    }

    /// Permanently stop the target (intercepted).
    pub fn deactivate(&mut self) {
        self.entity.active = false;
    }

    /// Retarget toward the current waypoint, then advance along the heading.
    pub fn update(&mut self, dt: f64) {
        if !self.entity.active {
            return;
        }

        if let Some(wp) = self.waypoints.get(self.current_waypoint).copied() {
            let position = self.entity.position();
            self.entity.kinematics.heading = bearing(position, wp);
            if distance(position, wp) < self.waypoint_threshold {
                self.current_waypoint += 1;
            }
        }

        self.entity.update(dt);
    }
}
