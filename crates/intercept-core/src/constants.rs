//! Simulation constants and tuning defaults.
//!
//! Defaults mirror the values a scenario document falls back to when a
//! field is omitted.

// --- Numeric guards ---

/// Squared range below which the line-of-sight rate is taken as zero.
pub const LOS_RANGE_SQ_EPSILON: f64 = 1e-9;

/// Range below which closing speed is taken as zero.
pub const CLOSING_RANGE_EPSILON: f64 = 1e-9;

/// Closing speed magnitude below which proportional navigation applies no correction.
pub const PN_CLOSING_SPEED_EPSILON: f64 = 1e-3;

/// Velocity-estimate magnitude below which the estimate is treated as unknown.
pub const VELOCITY_ESTIMATE_EPSILON: f64 = 1e-6;

// --- Track / classification ---

/// Detections needed to confirm a track.
pub const TRACK_CONFIRM_DETECTIONS: u32 = 3;

/// Confidence at which a target counts as classified.
pub const CLASSIFICATION_THRESHOLD: f64 = 0.8;

/// Fraction of the remaining gap to 1.0 gained on a correct look.
pub const CLASSIFICATION_GAIN: f64 = 0.3;

/// Multiplier applied to confidence on an incorrect look.
pub const CLASSIFICATION_DECAY: f64 = 0.7;

// --- Surveillance sensor ---

pub const SENSOR_DEFAULT_FIELD_OF_REGARD: f64 = std::f64::consts::TAU;
pub const SENSOR_DEFAULT_PD_AT_MAX_RANGE: f64 = 0.3;
pub const SENSOR_DEFAULT_CLASSIFICATION_ACCURACY: f64 = 0.8;

// --- Onboard seeker ---

pub const SEEKER_DEFAULT_MAX_RANGE: f64 = 500.0;
/// 60 degrees.
pub const SEEKER_DEFAULT_FIELD_OF_REGARD: f64 = std::f64::consts::FRAC_PI_3;
pub const SEEKER_DEFAULT_PD_AT_MAX_RANGE: f64 = 0.5;

// --- Target ---

/// Distance at which a waypoint counts as reached (meters).
pub const TARGET_DEFAULT_WAYPOINT_THRESHOLD: f64 = 20.0;

/// Radar cross-section (m²). Carried on the target, not used by the Pd law.
pub const TARGET_DEFAULT_RCS: f64 = 0.01;

// --- Interceptor ---

pub const INTERCEPTOR_DEFAULT_MAX_SPEED: f64 = 100.0;
/// 30 degrees per second.
pub const INTERCEPTOR_DEFAULT_MAX_TURN_RATE: f64 = std::f64::consts::FRAC_PI_6;
pub const INTERCEPTOR_DEFAULT_KILL_RADIUS: f64 = 5.0;
pub const INTERCEPTOR_DEFAULT_MAX_FLIGHT_TIME: f64 = 60.0;

// --- Engagement ---

pub const DEFAULT_NAV_GAIN: f64 = 4.0;
pub const DEFAULT_TERMINAL_HANDOVER_RANGE: f64 = 100.0;
pub const DEFAULT_STERN_OFFSET: f64 = 0.0;
pub const DEFAULT_APPROACH_BLEND_RANGE: f64 = 500.0;

// --- Simulation ---

/// Default timestep (seconds).
pub const DEFAULT_DT: f64 = 0.1;

/// Default wall-clock budget (seconds of simulated time).
pub const DEFAULT_MAX_TIME: f64 = 120.0;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;
