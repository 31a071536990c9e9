//! Standalone race simulation module
//!
//! This module contains the vehicle physics, audio mapping, parallax
//! scrolling and config hot-reload logic behind the race view. It runs
//! independently of the Bevy game engine, so it can be driven headless
//! from the console or from tests.

mod audio;
mod config;
mod frame_loop;
mod parallax;
mod script;
mod stats;
mod types;
mod vehicle;

pub use audio::{engine_targets, music_rate, smooth, AudioFrame, AudioParameterMapper};
pub use config::{
    ConfigError, ConfigParameters, ConfigSource, ConfigStore, EngineAudio, FileSource,
    InlineSource, MusicAudio,
};
pub use frame_loop::{AudioSink, FrameLoop, FrameOutput, LoopPhase, ReloadHandle, RenderSink};
pub use parallax::{ParallaxLayer, ParallaxScroller, ScrollFrame, LAYER_COUNT};
pub use script::{DrivePhase, DriveScript};
pub use stats::RaceStats;
pub use types::{
    lerp, InputState, VehiclePose, HANDBRAKE_MULTIPLIER, LANE_CENTER, LANE_MAX, LANE_MIN,
    LATERAL_RATE, MUSIC_RATE_SPAN, ROTATION_FACTOR, SMOOTHING_FACTOR, TILT_AMOUNT,
};
pub use vehicle::{step, wheel_rotation, VehicleState};
