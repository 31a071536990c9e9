//! Vehicle physics for the race simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use serde::Serialize;

use super::config::ConfigParameters;
use super::types::{
    InputState, VehiclePose, HANDBRAKE_MULTIPLIER, LANE_CENTER, LANE_MAX, LANE_MIN, LATERAL_RATE,
    ROTATION_FACTOR, TILT_AMOUNT,
};

/// Physical state of the player's vehicle for one race session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleState {
    /// Forward speed, always within `[0, max_speed]` after a step
    pub speed: f64,
    /// Position across the track, always within `[LANE_MIN, LANE_MAX]` after a step
    pub lateral_offset: f64,
    /// Visual body tilt in radians, a direct function of steering input
    pub tilt: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleState {
    /// State at the start of a race session: stopped, centred, level
    pub fn new() -> Self {
        Self {
            speed: 0.0,
            lateral_offset: LANE_CENTER,
            tilt: 0.0,
        }
    }

    pub fn pose(&self) -> VehiclePose {
        VehiclePose {
            lateral_offset: self.lateral_offset,
            tilt: self.tilt,
        }
    }
}

/// Advance the vehicle by `dt` seconds.
///
/// Throttle inputs are mutually exclusive in priority order: handbrake, then
/// accelerate, then brake, then engine drag. Braking deliberately uses the
/// acceleration rate, not the deceleration rate.
pub fn step(
    state: &VehicleState,
    config: &ConfigParameters,
    input: &InputState,
    dt: f64,
) -> VehicleState {
    let mut speed = state.speed;
    if input.handbrake {
        speed -= config.deceleration * dt * HANDBRAKE_MULTIPLIER;
    } else if input.accelerate {
        speed += config.acceleration * dt;
    } else if input.brake {
        speed -= config.acceleration * dt;
    } else {
        speed -= config.deceleration * dt;
    }
    let speed = speed.clamp(0.0, config.max_speed);

    // Left wins when both directions are held
    let (lateral_delta, tilt) = if input.steer_left {
        (-LATERAL_RATE * dt, -TILT_AMOUNT)
    } else if input.steer_right {
        (LATERAL_RATE * dt, TILT_AMOUNT)
    } else {
        (0.0, 0.0)
    };
    let lateral_offset = (state.lateral_offset + lateral_delta).clamp(LANE_MIN, LANE_MAX);

    VehicleState {
        speed,
        lateral_offset,
        tilt,
    }
}

/// Wheel rotation in radians for a frame travelled at `speed`
pub fn wheel_rotation(speed: f64, dt: f64) -> f64 {
    speed * dt * ROTATION_FACTOR
}
