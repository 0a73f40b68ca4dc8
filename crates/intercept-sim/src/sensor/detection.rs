//! Detection and classification rolls.
//!
//! Pd falls linearly from 1 at zero range to `pd_at_max_range` at
//! `max_range`, and is zero beyond. No aspect, altitude or RCS scaling is
//! applied; the target's RCS is carried for a future range-equation model.

use glam::DVec2;
use rand::Rng;

use intercept_core::types::{bearing, distance, wrap_angle};

use super::Sensor;

impl Sensor {
    /// Probability of detection at `range`.
    pub fn detection_probability(&self, range: f64) -> f64 {
        if range > self.max_range {
            return 0.0;
        }
        if self.max_range <= 0.0 {
            return 1.0;
        }
        let fraction = range / self.max_range;
        1.0 - fraction * (1.0 - self.pd_at_max_range)
    }

    /// Whether `target_pos` lies inside the field of regard as seen from `sensor_pos`.
    pub fn in_field_of_regard(&self, sensor_pos: DVec2, target_pos: DVec2) -> bool {
        if self.field_of_regard >= std::f64::consts::TAU {
            return true;
        }
        let offset = wrap_angle(bearing(sensor_pos, target_pos) - self.boresight);
        offset.abs() <= self.field_of_regard / 2.0
    }

    /// Roll for detection. Outside the field of regard nothing is drawn.
    pub fn try_detect<R: Rng + ?Sized>(
        &self,
        sensor_pos: DVec2,
        target_pos: DVec2,
        rng: &mut R,
    ) -> bool {
        if !self.in_field_of_regard(sensor_pos, target_pos) {
            return false;
        }
        let pd = self.detection_probability(distance(sensor_pos, target_pos));
        rng.gen::<f64>() < pd
    }

    /// Roll for a correct classification, independent of geometry.
    pub fn try_classify<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f64>() < self.classification_accuracy
    }
}
