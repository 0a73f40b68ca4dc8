//! Guidance laws for the interceptor.
//!
//! Every law is a pure function from kinematic state to a commanded
//! heading. Turn-rate limiting happens downstream in
//! [`Interceptor::apply_guidance`](crate::models::Interceptor::apply_guidance).

use glam::DVec2;

use intercept_core::constants::{PN_CLOSING_SPEED_EPSILON, VELOCITY_ESTIMATE_EPSILON};
use intercept_core::enums::TerminalGuidance;
use intercept_core::types::{bearing, closing_speed, distance, line_of_sight_rate, wrap_angle};

/// Pure pursuit: point straight at the target.
pub fn pure_pursuit(interceptor_pos: DVec2, target_pos: DVec2) -> f64 {
    bearing(interceptor_pos, target_pos)
}

/// Proportional navigation mapped to a heading command.
///
/// Commands the line-of-sight bearing plus `nav_gain` times the LOS rate.
/// When the closing speed is effectively zero the raw LOS bearing is
/// returned with no correction. The correction is not clamped here.
pub fn proportional_navigation(
    interceptor_pos: DVec2,
    interceptor_vel: DVec2,
    target_pos: DVec2,
    target_vel: DVec2,
    nav_gain: f64,
) -> f64 {
    let los_angle = bearing(interceptor_pos, target_pos);
    let los_rate = line_of_sight_rate(interceptor_pos, interceptor_vel, target_pos, target_vel);
    let vc = closing_speed(interceptor_pos, interceptor_vel, target_pos, target_vel);

    if vc.abs() < PN_CLOSING_SPEED_EPSILON {
        return los_angle;
    }

    wrap_angle(los_angle + nav_gain * los_rate)
}

/// Aim point for midcourse command guidance with a stern approach.
///
/// Without a usable velocity estimate, or with a non-positive stern
/// offset, this is the estimated target position. Otherwise the aim point
/// sits `stern_offset` meters behind the target along its estimated
/// velocity and slides linearly onto the target as range falls from
/// `approach_blend_range` to zero. A non-positive blend range keeps the
/// aim on the stern point.
pub fn command_aim_point(
    estimated_target_pos: DVec2,
    interceptor_pos: DVec2,
    estimated_target_vel: Option<DVec2>,
    stern_offset: f64,
    approach_blend_range: f64,
) -> DVec2 {
    let Some(vel) = estimated_target_vel else {
        return estimated_target_pos;
    };
    let speed = vel.length();
    if stern_offset <= 0.0 || speed < VELOCITY_ESTIMATE_EPSILON {
        return estimated_target_pos;
    }

    let stern_point = estimated_target_pos - stern_offset * (vel / speed);
    let range = distance(interceptor_pos, estimated_target_pos);
    let stern_weight = if approach_blend_range > 0.0 {
        (range / approach_blend_range).min(1.0)
    } else {
        1.0
    };

    (1.0 - stern_weight) * estimated_target_pos + stern_weight * stern_point
}

/// Midcourse command guidance: heading toward [`command_aim_point`].
pub fn command_guidance(
    estimated_target_pos: DVec2,
    interceptor_pos: DVec2,
    estimated_target_vel: Option<DVec2>,
    stern_offset: f64,
    approach_blend_range: f64,
) -> f64 {
    let aim = command_aim_point(
        estimated_target_pos,
        interceptor_pos,
        estimated_target_vel,
        stern_offset,
        approach_blend_range,
    );
    pure_pursuit(interceptor_pos, aim)
}

/// Terminal heading command for the selected law, on true kinematic state.
pub fn terminal_command(
    law: TerminalGuidance,
    interceptor_pos: DVec2,
    interceptor_vel: DVec2,
    target_pos: DVec2,
    target_vel: DVec2,
    nav_gain: f64,
) -> f64 {
    match law {
        TerminalGuidance::ProportionalNav => proportional_navigation(
            interceptor_pos,
            interceptor_vel,
            target_pos,
            target_vel,
            nav_gain,
        ),
        TerminalGuidance::PurePursuit => pure_pursuit(interceptor_pos, target_pos),
    }
}
