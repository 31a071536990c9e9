//! Engine and music audio parameters derived from vehicle speed
//!
//! Engine pitch and volume follow their speed-mapped targets through a
//! first-order low-pass filter with a fixed per-tick factor, so smoothing
//! speed depends on frame rate. Music rate is recomputed each tick.

use serde::Serialize;

use super::config::ConfigParameters;
use super::types::{lerp, MUSIC_RATE_SPAN, SMOOTHING_FACTOR};

/// Audio values for one frame, ready for the audio sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFrame {
    pub engine_pitch: f64,
    pub engine_volume: f64,
    pub music_rate: f64,
    pub music_volume: f64,
}

impl AudioFrame {
    /// Levels applied on the frame a new config snapshot is installed:
    /// engine volume drops to the new floor, music takes the new volume.
    pub fn with_reloaded_levels(self, config: &ConfigParameters) -> Self {
        Self {
            engine_volume: config.engine.min_volume,
            music_volume: config.music.volume,
            ..self
        }
    }
}

/// Smoothed engine state carried across frames
#[derive(Debug, Clone, PartialEq)]
pub struct AudioParameterMapper {
    engine_pitch: f64,
    engine_volume: f64,
}

impl AudioParameterMapper {
    /// Start at the idle end of the engine range
    pub fn new(config: &ConfigParameters) -> Self {
        Self {
            engine_pitch: config.engine.min_pitch,
            engine_volume: config.engine.min_volume,
        }
    }

    pub fn engine_pitch(&self) -> f64 {
        self.engine_pitch
    }

    pub fn engine_volume(&self) -> f64 {
        self.engine_volume
    }

    /// Move the smoothed values one tick toward their targets for `speed`
    pub fn update(&mut self, speed: f64, config: &ConfigParameters) -> AudioFrame {
        let (target_pitch, target_volume) = engine_targets(speed, config);
        self.engine_pitch = smooth(self.engine_pitch, target_pitch);
        self.engine_volume = smooth(self.engine_volume, target_volume);

        AudioFrame {
            engine_pitch: self.engine_pitch,
            engine_volume: self.engine_volume,
            music_rate: music_rate(speed, config),
            music_volume: config.music.volume,
        }
    }
}

/// Instantaneous (pitch, volume) the engine would settle at for `speed`
pub fn engine_targets(speed: f64, config: &ConfigParameters) -> (f64, f64) {
    let t = speed / config.max_speed;
    let engine = &config.engine;
    (
        lerp(engine.min_pitch, engine.max_pitch, t),
        lerp(engine.min_volume, engine.max_volume, t),
    )
}

/// One low-pass step covering a fixed fraction of the remaining distance
pub fn smooth(current: f64, target: f64) -> f64 {
    lerp(current, target, SMOOTHING_FACTOR)
}

pub fn music_rate(speed: f64, config: &ConfigParameters) -> f64 {
    if config.music.speed_control {
        1.0 + (speed / config.max_speed) * MUSIC_RATE_SPAN
    } else {
        1.0
    }
}
