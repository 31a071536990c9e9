//! UI components and resources linking Bevy entities to the race session

use bevy::prelude::*;

use crate::simulation::{
    AudioSink as AudioFrameSink, FrameLoop, ParallaxLayer, RenderSink, ScrollFrame, VehiclePose,
    LANE_CENTER, LAYER_COUNT,
};

/// Resource wrapper for the race session driver
#[derive(Resource)]
pub struct RaceLoopResource(pub FrameLoop);

/// Latest visual state emitted by the race session
#[derive(Resource)]
pub struct RenderState {
    pub pose: VehiclePose,
    /// Accumulated wheel angle in radians
    pub wheel_angle: f64,
    pub offsets: [f64; LAYER_COUNT],
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            pose: VehiclePose {
                lateral_offset: LANE_CENTER,
                tilt: 0.0,
            },
            wheel_angle: 0.0,
            offsets: [0.0; LAYER_COUNT],
        }
    }
}

impl RenderSink for RenderState {
    fn vehicle_pose(&mut self, pose: VehiclePose) {
        self.pose = pose;
    }

    fn wheel_rotation(&mut self, delta: f64) {
        self.wheel_angle = (self.wheel_angle + delta) % std::f64::consts::TAU;
    }

    fn scroll(&mut self, frame: &ScrollFrame) {
        self.offsets = frame.offsets;
    }
}

/// Latest audio levels emitted by the race session
#[derive(Resource)]
pub struct AudioState {
    pub engine_pitch: f64,
    pub engine_volume: f64,
    pub music_rate: f64,
    pub music_volume: f64,
}

impl Default for AudioState {
    fn default() -> Self {
        Self {
            engine_pitch: 1.0,
            engine_volume: 0.0,
            music_rate: 1.0,
            music_volume: 0.0,
        }
    }
}

impl AudioFrameSink for AudioState {
    fn engine(&mut self, pitch: f64, volume: f64) {
        self.engine_pitch = pitch;
        self.engine_volume = volume;
    }

    fn music(&mut self, rate: f64, volume: f64) {
        self.music_rate = rate;
        self.music_volume = volume;
    }
}

/// Debug overlay lines for the current frame
#[derive(Resource, Default)]
pub struct DebugLines(pub Vec<String>);

/// One tile of a scrolling background layer; two tiles per layer cover the screen
#[derive(Component)]
pub struct ParallaxStrip {
    pub layer: ParallaxLayer,
    pub slot: u8,
}

/// Container holding the car body and wheels
#[derive(Component)]
pub struct VehicleContainer;

#[derive(Component)]
pub struct Wheel;

/// Looping engine sound
#[derive(Component)]
pub struct EngineLoop;

/// Looping background music
#[derive(Component)]
pub struct MusicLoop;

#[derive(Component)]
pub struct DebugText;
