//! Sensor model shared by the surveillance radar and the onboard seeker.
//!
//! A `Sensor` is immutable configuration. It keeps no state between calls
//! and never creates randomness of its own: every roll draws from the
//! generator passed in by the caller.

pub mod detection;
pub mod measurement;

use serde::{Deserialize, Serialize};

use intercept_core::constants::*;

pub use measurement::SensorMeasurement;

/// Gaussian measurement noise. A zero standard deviation disables that channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementNoise {
    /// Range σ as a fraction of true range.
    pub range_fraction: f64,
    /// Bearing σ (rad).
    pub bearing_std: f64,
    /// Speed σ as a fraction of true speed.
    pub speed_fraction: f64,
    /// Heading σ (rad).
    pub heading_std: f64,
}

/// Range-gated, sector-limited sensor with linear Pd falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Maximum detection range (m).
    pub max_range: f64,
    /// Total angular width of the field of regard (rad). ≥ 2π is omnidirectional.
    pub field_of_regard: f64,
    /// Center of the field of regard (rad).
    pub boresight: f64,
    /// Detection probability at `max_range`.
    pub pd_at_max_range: f64,
    /// Probability that a single look classifies correctly.
    pub classification_accuracy: f64,
    pub noise: MeasurementNoise,
}

impl Sensor {
    /// Omnidirectional surveillance sensor with default Pd, accuracy and no noise.
    pub fn new(max_range: f64) -> Self {
        Self {
            max_range,
            field_of_regard: SENSOR_DEFAULT_FIELD_OF_REGARD,
            boresight: 0.0,
            pd_at_max_range: SENSOR_DEFAULT_PD_AT_MAX_RANGE,
            classification_accuracy: SENSOR_DEFAULT_CLASSIFICATION_ACCURACY,
            noise: MeasurementNoise::default(),
        }
    }

    /// Default onboard seeker: 500 m, 60° field of regard, Pd 0.5 at max range.
    pub fn seeker() -> Self {
        Self {
            field_of_regard: SEEKER_DEFAULT_FIELD_OF_REGARD,
            pd_at_max_range: SEEKER_DEFAULT_PD_AT_MAX_RANGE,
            ..Self::new(SEEKER_DEFAULT_MAX_RANGE)
        }
    }

    pub fn with_field_of_regard(mut self, field_of_regard: f64, boresight: f64) -> Self {
        self.field_of_regard = field_of_regard;
        self.boresight = boresight;
        self
    }

    pub fn with_pd_at_max_range(mut self, pd: f64) -> Self {
        self.pd_at_max_range = pd;
        self
    }

    pub fn with_classification_accuracy(mut self, accuracy: f64) -> Self {
        self.classification_accuracy = accuracy;
        self
    }

    pub fn with_noise(mut self, noise: MeasurementNoise) -> Self {
        self.noise = noise;
        self
    }
}
