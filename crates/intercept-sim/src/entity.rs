//! Planar kinematic entity shared by the target and the interceptor.

use glam::DVec2;

use intercept_core::types::Kinematics;

/// Kinematic state plus an activity flag. Inactive entities are frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kinematics: Kinematics,
    pub name: String,
    pub active: bool,
}

impl Entity {
    pub fn new(position: DVec2, speed: f64, heading: f64, name: impl Into<String>) -> Self {
        Self {
            kinematics: Kinematics::new(position, speed, heading),
            name: name.into(),
            active: true,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.kinematics.position
    }

    pub fn speed(&self) -> f64 {
        self.kinematics.speed
    }

    pub fn heading(&self) -> f64 {
        self.kinematics.heading
    }

    pub fn velocity(&self) -> DVec2 {
        self.kinematics.velocity()
    }

    /// Advance position by one timestep while active.
    pub fn update(&mut self, dt: f64) {
        if self.active {
            self.kinematics.propagate(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_entity_moves_along_heading() {
        let mut entity = Entity::new(DVec2::ZERO, 10.0, 0.0, "probe");
        entity.update(1.0);
        assert!((entity.position().x - 10.0).abs() < 1e-12);
        assert!(entity.position().y.abs() < 1e-12);
    }

    #[test]
    fn test_inactive_entity_is_frozen() {
        let mut entity = Entity::new(DVec2::new(3.0, 4.0), 50.0, 1.0, "probe");
        entity.active = false;
        entity.update(5.0);
        assert_eq!(entity.position(), DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_heading_is_wrapped_on_construction() {
        let entity = Entity::new(DVec2::ZERO, 1.0, 3.0 * std::f64::consts::PI, "probe");
        assert!((entity.heading() - std::f64::consts::PI).abs() < 1e-9);
    }
}
