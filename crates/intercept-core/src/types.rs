//! Fundamental geometric and simulation types.
//!
//! Angles are radians measured counter-clockwise from +x. Headings and
//! bearings are kept in (-π, π].

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{CLOSING_RANGE_EPSILON, LOS_RANGE_SQ_EPSILON};

/// Planar kinematic state: position, scalar speed and heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Position in meters.
    pub position: DVec2,
    /// Speed in m/s, never negative.
    pub speed: f64,
    /// Heading in radians, wrapped to (-π, π].
    pub heading: f64,
}

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Completed ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Kinematics {
    pub fn new(position: DVec2, speed: f64, heading: f64) -> Self {
        Self {
            position,
            speed: speed.max(0.0),
            heading: wrap_angle(heading),
        }
    }

    /// Velocity derived from speed and heading.
    pub fn velocity(&self) -> DVec2 {
        self.speed * unit_vector(self.heading)
    }

    /// Straight-line propagation: `position += velocity * dt`.
    pub fn propagate(&mut self, dt: f64) {
        self.position += self.velocity() * dt;
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    ///
    /// Elapsed time is derived from the tick count, not summed.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * dt;
    }
}

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Bearing from `from` to `to`, in (-π, π].
///
/// Coincident points yield 0.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let delta = to - from;
    wrap_angle(delta.y.atan2(delta.x))
}

/// Unit vector pointing along `angle`.
pub fn unit_vector(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Wrap an angle to (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Closing speed of `a` toward `b` along the line of sight (positive = closing).
///
/// Returns 0 for coincident points.
pub fn closing_speed(pos_a: DVec2, vel_a: DVec2, pos_b: DVec2, vel_b: DVec2) -> f64 {
    let los = pos_b - pos_a;
    let range = los.length();
    if range < CLOSING_RANGE_EPSILON {
        return 0.0;
    }
    (vel_a - vel_b).dot(los / range)
}

/// Line-of-sight angular rate from `a` to `b` in rad/s: `(r × v_rel) / |r|²`.
///
/// Returns 0 when the squared range is below [`LOS_RANGE_SQ_EPSILON`].
pub fn line_of_sight_rate(pos_a: DVec2, vel_a: DVec2, pos_b: DVec2, vel_b: DVec2) -> f64 {
    let rel_pos = pos_b - pos_a;
    let rel_vel = vel_b - vel_a;
    let range_sq = rel_pos.length_squared();
    if range_sq < LOS_RANGE_SQ_EPSILON {
        return 0.0;
    }
    rel_pos.perp_dot(rel_vel) / range_sq
}
