//! Core types for the race simulation
//!
//! These are standalone types that don't depend on Bevy.

use serde::Serialize;

/// Lowest playable lane offset (top edge of the track)
pub const LANE_MIN: f64 = 250.0;

/// Highest playable lane offset (bottom edge of the track)
pub const LANE_MAX: f64 = 350.0;

/// Lane offset a vehicle starts a race session at
pub const LANE_CENTER: f64 = 320.0;

/// Lane change rate in offset units per second
pub const LATERAL_RATE: f64 = 200.0;

/// Body tilt in radians while a lane change is in progress
pub const TILT_AMOUNT: f64 = 0.1;

/// Wheel rotation in radians per unit of distance travelled
pub const ROTATION_FACTOR: f64 = 5.0;

/// Multiplier applied to deceleration while the handbrake is held
pub const HANDBRAKE_MULTIPLIER: f64 = 3.0;

/// Fraction of the remaining distance to target covered per tick by smoothed audio values
pub const SMOOTHING_FACTOR: f64 = 0.1;

/// Extra music playback rate at top speed when speed control is enabled
pub const MUSIC_RATE_SPAN: f64 = 0.3;

/// Player controls sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InputState {
    pub accelerate: bool,
    /// Brake, or reverse throttle once stopped
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
    /// One-shot edge: true only on the frame the reload key went down
    pub reload_requested: bool,
}

impl InputState {
    /// No controls held
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn accelerating() -> Self {
        Self {
            accelerate: true,
            ..Self::default()
        }
    }

    pub fn braking() -> Self {
        Self {
            brake: true,
            ..Self::default()
        }
    }

    pub fn handbraking() -> Self {
        Self {
            handbrake: true,
            ..Self::default()
        }
    }

    pub fn with_steer_left(mut self) -> Self {
        self.steer_left = true;
        self
    }

    pub fn with_steer_right(mut self) -> Self {
        self.steer_right = true;
        self
    }

    pub fn with_reload(mut self) -> Self {
        self.reload_requested = true;
        self
    }
}

/// Transform of the vehicle container handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehiclePose {
    pub lateral_offset: f64,
    pub tilt: f64,
}

/// Linear interpolation between `a` and `b`
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
