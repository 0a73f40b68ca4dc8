//! Noisy target measurement.
//!
//! Noise is applied in the sensor's native polar frame (range, bearing) and
//! to the target's speed and heading, then converted to a Cartesian
//! position and velocity estimate.

use glam::DVec2;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use intercept_core::types::{bearing, distance, unit_vector};

use super::Sensor;

/// One sensor observation, with true values kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorMeasurement {
    pub measured_range: f64,
    pub measured_bearing: f64,
    pub measured_speed: f64,
    pub measured_heading: f64,
    pub estimated_position: DVec2,
    pub estimated_velocity: DVec2,
    pub true_range: f64,
    pub true_bearing: f64,
    pub true_speed: f64,
    pub true_heading: f64,
}

/// `value + N(0, sigma)`. Nothing is drawn when `sigma` is not positive.
fn perturb<R: Rng + ?Sized>(value: f64, sigma: f64, rng: &mut R) -> f64 {
    if sigma > 0.0 {
        let z: f64 = rng.sample(StandardNormal);
        value + sigma * z
    } else {
        value
    }
}

impl Sensor {
    /// Measure a target at `target_pos` moving at `target_speed` on `target_heading`.
    ///
    /// Draw order is range, bearing, speed, heading. Measured range and
    /// speed are floored at zero.
    pub fn measure<R: Rng + ?Sized>(
        &self,
        sensor_pos: DVec2,
        target_pos: DVec2,
        target_speed: f64,
        target_heading: f64,
        rng: &mut R,
    ) -> SensorMeasurement {
        let true_range = distance(sensor_pos, target_pos);
        let true_bearing = bearing(sensor_pos, target_pos);

        let noise = &self.noise;
        let measured_range = perturb(true_range, noise.range_fraction * true_range, rng).max(0.0);
        let measured_bearing = perturb(true_bearing, noise.bearing_std, rng);
        let measured_speed =
            perturb(target_speed, noise.speed_fraction * target_speed, rng).max(0.0);
        let measured_heading = perturb(target_heading, noise.heading_std, rng);

        SensorMeasurement {
            measured_range,
            measured_bearing,
            measured_speed,
            measured_heading,
            estimated_position: sensor_pos + measured_range * unit_vector(measured_bearing),
            estimated_velocity: measured_speed * unit_vector(measured_heading),
            true_range,
            true_bearing,
            true_speed: target_speed,
            true_heading: target_heading,
        }
    }
}
