//! Scenario documents: a JSON description of one engagement, wired up into
//! a ready-to-run [`SimulationEngine`].
//!
//! Angles are written in degrees and converted to radians at build time.
//! Only `target.position`, `target.speed`, `surveillance_sensor.max_range`
//! and `interceptor.position` are required; everything else has a default.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

use intercept_core::constants::*;
use intercept_core::enums::TerminalGuidance;

use crate::engagement::{EngagementManager, EngagementParams};
use crate::engine::{SimConfig, SimulationEngine};
use crate::error::ScenarioError;
use crate::models::{Interceptor, InterceptorParams, Target};
use crate::sensor::{MeasurementNoise, Sensor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub target: TargetConfig,
    pub surveillance_sensor: SurveillanceSensorConfig,
    pub interceptor: InterceptorConfig,
    #[serde(default)]
    pub engagement: EngagementConfig,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub position: DVec2,
    pub speed: f64,
    #[serde(default)]
    pub waypoints: Vec<DVec2>,
    #[serde(default = "default_rcs")]
    pub rcs: f64,
    #[serde(default = "default_target_name")]
    pub name: String,
    #[serde(default = "default_waypoint_threshold")]
    pub waypoint_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceSensorConfig {
    #[serde(default)]
    pub position: DVec2,
    pub max_range: f64,
    #[serde(default = "default_surveillance_fov_deg")]
    pub field_of_regard_deg: f64,
    #[serde(default)]
    pub boresight_deg: f64,
    #[serde(default = "default_surveillance_pd")]
    pub pd_at_max_range: f64,
    #[serde(default = "default_classification_accuracy")]
    pub classification_accuracy: f64,
    #[serde(default)]
    pub noise: NoiseConfig,
}

/// One-sigma measurement noise. Zero disables a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub range_noise_fraction: f64,
    pub bearing_noise_deg: f64,
    pub speed_noise_fraction: f64,
    pub heading_noise_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterceptorConfig {
    pub position: DVec2,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
    #[serde(default = "default_max_turn_rate_deg")]
    pub max_turn_rate_deg: f64,
    #[serde(default = "default_kill_radius")]
    pub kill_radius: f64,
    #[serde(default = "default_max_flight_time")]
    pub max_flight_time: f64,
    #[serde(default = "default_interceptor_name")]
    pub name: String,
    #[serde(default)]
    pub seeker: SeekerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekerConfig {
    pub max_range: f64,
    pub field_of_regard_deg: f64,
    pub pd_at_max_range: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// `"proportional_nav"` or `"pure_pursuit"`.
    pub terminal_guidance: String,
    pub nav_gain: f64,
    pub terminal_handover_range: f64,
    pub stern_offset: f64,
    pub approach_blend_range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub dt: f64,
    pub max_time: f64,
}

fn default_rcs() -> f64 {
    TARGET_DEFAULT_RCS
}

fn default_target_name() -> String {
    "target".to_string()
}

fn default_waypoint_threshold() -> f64 {
    TARGET_DEFAULT_WAYPOINT_THRESHOLD
}

fn default_surveillance_fov_deg() -> f64 {
    SENSOR_DEFAULT_FIELD_OF_REGARD.to_degrees()
}

fn default_surveillance_pd() -> f64 {
    SENSOR_DEFAULT_PD_AT_MAX_RANGE
}

fn default_classification_accuracy() -> f64 {
    SENSOR_DEFAULT_CLASSIFICATION_ACCURACY
}

fn default_max_speed() -> f64 {
    INTERCEPTOR_DEFAULT_MAX_SPEED
}

fn default_max_turn_rate_deg() -> f64 {
    INTERCEPTOR_DEFAULT_MAX_TURN_RATE.to_degrees()
}

fn default_kill_radius() -> f64 {
    INTERCEPTOR_DEFAULT_KILL_RADIUS
}

fn default_max_flight_time() -> f64 {
    INTERCEPTOR_DEFAULT_MAX_FLIGHT_TIME
}

fn default_interceptor_name() -> String {
    "interceptor".to_string()
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            max_range: SEEKER_DEFAULT_MAX_RANGE,
            field_of_regard_deg: SEEKER_DEFAULT_FIELD_OF_REGARD.to_degrees(),
            pd_at_max_range: SEEKER_DEFAULT_PD_AT_MAX_RANGE,
        }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            terminal_guidance: TerminalGuidance::default().as_str().to_string(),
            nav_gain: DEFAULT_NAV_GAIN,
            terminal_handover_range: DEFAULT_TERMINAL_HANDOVER_RANGE,
            stern_offset: DEFAULT_STERN_OFFSET,
            approach_blend_range: DEFAULT_APPROACH_BLEND_RANGE,
        }
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

/// Baseline engagement: a drone inbound from the north-east toward a
/// radar-defended site at the origin, with the launcher beside the radar.
impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            target: TargetConfig {
                position: DVec2::new(3000.0, 2000.0),
                speed: 30.0,
                waypoints: vec![DVec2::new(1500.0, 1000.0), DVec2::ZERO],
                rcs: default_rcs(),
                name: default_target_name(),
                waypoint_threshold: default_waypoint_threshold(),
            },
            surveillance_sensor: SurveillanceSensorConfig {
                position: DVec2::ZERO,
                max_range: 5000.0,
                field_of_regard_deg: default_surveillance_fov_deg(),
                boresight_deg: 0.0,
                pd_at_max_range: default_surveillance_pd(),
                classification_accuracy: default_classification_accuracy(),
                noise: NoiseConfig::default(),
            },
            interceptor: InterceptorConfig {
                position: DVec2::new(50.0, 0.0),
                max_speed: default_max_speed(),
                max_turn_rate_deg: default_max_turn_rate_deg(),
                kill_radius: default_kill_radius(),
                max_flight_time: default_max_flight_time(),
                name: default_interceptor_name(),
                seeker: SeekerConfig::default(),
            },
            engagement: EngagementConfig::default(),
            simulation: SimulationSettings::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parse and validate a JSON scenario document.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engagement core cannot run with.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let sim = &self.simulation;
        positive("simulation.dt", sim.dt)?;
        positive("simulation.max_time", sim.max_time)?;

        let target = &self.target;
        finite_point("target.position", target.position)?;
        non_negative("target.speed", target.speed)?;
        non_negative("target.waypoint_threshold", target.waypoint_threshold)?;
        non_negative("target.rcs", target.rcs)?;
        for wp in &target.waypoints {
            finite_point("target.waypoints", *wp)?;
        }

        let sensor = &self.surveillance_sensor;
        finite_point("surveillance_sensor.position", sensor.position)?;
        positive("surveillance_sensor.max_range", sensor.max_range)?;
        positive("surveillance_sensor.field_of_regard_deg", sensor.field_of_regard_deg)?;
        finite("surveillance_sensor.boresight_deg", sensor.boresight_deg)?;
        probability("surveillance_sensor.pd_at_max_range", sensor.pd_at_max_range)?;
        probability(
            "surveillance_sensor.classification_accuracy",
            sensor.classification_accuracy,
        )?;
        let noise = &sensor.noise;
        non_negative("surveillance_sensor.noise.range_noise_fraction", noise.range_noise_fraction)?;
        non_negative("surveillance_sensor.noise.bearing_noise_deg", noise.bearing_noise_deg)?;
        non_negative("surveillance_sensor.noise.speed_noise_fraction", noise.speed_noise_fraction)?;
        non_negative("surveillance_sensor.noise.heading_noise_deg", noise.heading_noise_deg)?;

        let interceptor = &self.interceptor;
        finite_point("interceptor.position", interceptor.position)?;
        positive("interceptor.max_speed", interceptor.max_speed)?;
        positive("interceptor.max_turn_rate_deg", interceptor.max_turn_rate_deg)?;
        positive("interceptor.kill_radius", interceptor.kill_radius)?;
        positive("interceptor.max_flight_time", interceptor.max_flight_time)?;
        let seeker = &interceptor.seeker;
        positive("interceptor.seeker.max_range", seeker.max_range)?;
        positive("interceptor.seeker.field_of_regard_deg", seeker.field_of_regard_deg)?;
        probability("interceptor.seeker.pd_at_max_range", seeker.pd_at_max_range)?;

        let engagement = &self.engagement;
        finite("engagement.nav_gain", engagement.nav_gain)?;
        non_negative("engagement.terminal_handover_range", engagement.terminal_handover_range)?;
        non_negative("engagement.stern_offset", engagement.stern_offset)?;
        finite("engagement.approach_blend_range", engagement.approach_blend_range)?;

        Ok(())
    }

    /// Terminal law named by the document. Unknown names fall back to pure pursuit.
    pub fn terminal_guidance(&self) -> TerminalGuidance {
        let selector = self.engagement.terminal_guidance.as_str();
        TerminalGuidance::from_selector(selector).unwrap_or_else(|| {
            warn!(selector, "unknown terminal guidance, using pure pursuit");
            TerminalGuidance::PurePursuit
        })
    }

    /// Validate and assemble an engine seeded with `seed`.
    pub fn build(&self, seed: u64) -> Result<SimulationEngine, ScenarioError> {
        self.validate()?;

        let t = &self.target;
        let target = Target::new(t.position, t.speed, t.waypoints.clone(), t.name.as_str())
            .with_waypoint_threshold(t.waypoint_threshold)
            .with_rcs(t.rcs);

        let s = &self.surveillance_sensor;
        let surveillance = Sensor::new(s.max_range)
            .with_field_of_regard(
                s.field_of_regard_deg.to_radians(),
                s.boresight_deg.to_radians(),
            )
            .with_pd_at_max_range(s.pd_at_max_range)
            .with_classification_accuracy(s.classification_accuracy)
            .with_noise(MeasurementNoise {
                range_fraction: s.noise.range_noise_fraction,
                bearing_std: s.noise.bearing_noise_deg.to_radians(),
                speed_fraction: s.noise.speed_noise_fraction,
                heading_std: s.noise.heading_noise_deg.to_radians(),
            });

        let i = &self.interceptor;
        let seeker = Sensor::new(i.seeker.max_range)
            .with_field_of_regard(i.seeker.field_of_regard_deg.to_radians(), 0.0)
            .with_pd_at_max_range(i.seeker.pd_at_max_range);
        let interceptor = Interceptor::new(
            i.position,
            InterceptorParams {
                max_speed: i.max_speed,
                max_turn_rate: i.max_turn_rate_deg.to_radians(),
                kill_radius: i.kill_radius,
                max_flight_time: i.max_flight_time,
            },
            seeker,
            i.name.as_str(),
        );

        let e = &self.engagement;
        let params = EngagementParams {
            terminal_guidance: self.terminal_guidance(),
            nav_gain: e.nav_gain,
            terminal_handover_range: e.terminal_handover_range,
            stern_offset: e.stern_offset,
            approach_blend_range: e.approach_blend_range,
        };
        let engagement = EngagementManager::new(t.name.as_str(), surveillance, s.position, params);

        let config = SimConfig {
            seed,
            dt: self.simulation.dt,
            max_time: self.simulation.max_time,
        };
        Ok(SimulationEngine::new(target, interceptor, engagement, config))
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn finite_point(field: &'static str, point: DVec2) -> Result<(), ScenarioError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must be finite, got {point}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ScenarioError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ScenarioError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must not be negative, got {value}")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ScenarioError> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScenarioError::invalid(field, format!("must lie in [0, 1], got {value}")))
    }
}
