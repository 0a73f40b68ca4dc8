//! Track formation and classification confidence.
//!
//! Both states are created once per engagement and only ever ratchet
//! forward: a confirmed track stays confirmed, a classified target stays
//! classified.

use rand::Rng;

use intercept_core::constants::{
    CLASSIFICATION_DECAY, CLASSIFICATION_GAIN, CLASSIFICATION_THRESHOLD,
    TRACK_CONFIRM_DETECTIONS,
};

use crate::sensor::Sensor;

/// Surveillance track on a single target.
///
/// Missed detections coast the track: they neither decrement nor reset the
/// detection count.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackState {
    target_id: String,
    detected: bool,
    detection_count: u32,
    track_confirmed: bool,
    confirm_threshold: u32,
}

/// Classification confidence accumulated over sensor looks.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationState {
    confidence: f64,
    threshold: f64,
    classified: bool,
    looks: u32,
}

impl TrackState {
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            detected: false,
            detection_count: 0,
            track_confirmed: false,
            confirm_threshold: TRACK_CONFIRM_DETECTIONS,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// At least one detection has been recorded.
    pub fn detected(&self) -> bool {
        self.detected
    }

    pub fn detection_count(&self) -> u32 {
        self.detection_count
    }

    pub fn track_confirmed(&self) -> bool {
        self.track_confirmed
    }

    pub fn confirm_threshold(&self) -> u32 {
        self.confirm_threshold
    }

    /// Fold one detection roll into the track.
    pub fn process_detection(&mut self, detected: bool) {
        if !detected {
            return;
        }
        self.detection_count += 1;
        self.detected = true;
        if self.detection_count >= self.confirm_threshold {
            self.track_confirmed = true;
        }
    }
}

impl Default for ClassificationState {
    fn default() -> Self {
        Self::new(CLASSIFICATION_THRESHOLD)
    }
}

impl ClassificationState {
    pub fn new(threshold: f64) -> Self {
        Self {
            confidence: 0.0,
            threshold,
            classified: false,
            looks: 0,
        }
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classified(&self) -> bool {
        self.classified
    }

    pub fn looks(&self) -> u32 {
        self.looks
    }

    /// Take one classification look. Ignored once classified.
    pub fn process_look<R: Rng + ?Sized>(&mut self, sensor: &Sensor, rng: &mut R) {
        if self.classified {
            return;
        }
        self.looks += 1;
        let correct = sensor.try_classify(rng);
        self.confidence = filter_confidence(self.confidence, correct);
        if self.confidence >= self.threshold {
            self.classified = true;
        }
    }
}

/// Fixed-gain exponential confidence filter.
///
/// A correct look closes 30% of the gap to 1, an incorrect look keeps 70%
/// of the current confidence. This is a tuning heuristic, not a Bayesian
/// posterior over target identity.
pub fn filter_confidence(confidence: f64, correct: bool) -> f64 {
    if correct {
        confidence + (1.0 - confidence) * CLASSIFICATION_GAIN
    } else {
        confidence * CLASSIFICATION_DECAY
    }
}
