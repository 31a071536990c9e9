//! Per-frame driver that ties the race simulation together
//!
//! This is the entry point for running a race session without any Bevy
//! dependencies. The host calls [`FrameLoop::frame`] once per rendered frame
//! with the sampled input and the frame delta.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use super::audio::{AudioFrame, AudioParameterMapper};
use super::config::{ConfigError, ConfigSource, ConfigStore};
use super::parallax::{ParallaxScroller, ScrollFrame};
use super::types::{InputState, VehiclePose};
use super::vehicle::{step, wheel_rotation, VehicleState};

/// Receives the visual results of each frame
pub trait RenderSink {
    fn vehicle_pose(&mut self, pose: VehiclePose);
    fn wheel_rotation(&mut self, delta: f64);
    fn scroll(&mut self, frame: &ScrollFrame);
}

/// Receives the audio results of each frame, for the engine and music loops
pub trait AudioSink {
    fn engine(&mut self, pitch: f64, volume: f64);
    fn music(&mut self, rate: f64, volume: f64);
}

/// Where the loop is in its reload cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopPhase {
    Running,
    /// A reload was requested; it is applied when the current tick ends
    ReloadPending,
}

/// Cloneable trigger for requesting a config reload from outside the loop,
/// including from other threads.
#[derive(Debug, Clone, Default)]
pub struct ReloadHandle(Arc<AtomicBool>);

impl ReloadHandle {
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Everything one tick produced
#[derive(Debug, Clone, Serialize)]
pub struct FrameOutput {
    /// 1-based tick number within the session
    pub tick: u64,
    /// Generation of the config snapshot the tick ran under
    pub config_generation: u64,
    pub vehicle: VehicleState,
    pub wheel_rotation: f64,
    pub scroll: ScrollFrame,
    pub audio: AudioFrame,
    /// Outcome of a reload performed at the end of this tick
    pub reload: Option<Result<(), ConfigError>>,
}

impl FrameOutput {
    /// Forward this frame to the rendering and audio collaborators
    pub fn emit(&self, render: &mut dyn RenderSink, audio: &mut dyn AudioSink) {
        render.vehicle_pose(self.vehicle.pose());
        render.wheel_rotation(self.wheel_rotation);
        render.scroll(&self.scroll);
        audio.engine(self.audio.engine_pitch, self.audio.engine_volume);
        audio.music(self.audio.music_rate, self.audio.music_volume);
    }

    /// Debug overlay lines
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Speed: {:.1}", self.vehicle.speed),
            format!("Pitch: {:.2}", self.audio.engine_pitch),
            format!("Volume: {:.2}", self.audio.engine_volume),
        ];
        match &self.reload {
            Some(Ok(())) => lines.push("Config reloaded!".to_string()),
            Some(Err(e)) => lines.push(format!("Config reload failed: {e}")),
            None => lines.push("Press R to reload config".to_string()),
        }
        lines
    }
}

/// Owns all mutable state of one race session
pub struct FrameLoop {
    config: ConfigStore,
    source: Box<dyn ConfigSource>,
    vehicle: VehicleState,
    audio: AudioParameterMapper,
    scroller: ParallaxScroller,
    phase: LoopPhase,
    reload_handle: ReloadHandle,
    tick: u64,
}

impl FrameLoop {
    /// Start a session with an already loaded store; `source` is used for reloads
    pub fn new(config: ConfigStore, source: Box<dyn ConfigSource>) -> Self {
        let audio = AudioParameterMapper::new(&config.current());
        Self {
            config,
            source,
            vehicle: VehicleState::new(),
            audio,
            scroller: ParallaxScroller::new(),
            phase: LoopPhase::Running,
            reload_handle: ReloadHandle::default(),
            tick: 0,
        }
    }

    /// Load the initial config from `source` and start a session
    pub fn start(source: impl ConfigSource + 'static) -> Result<Self, ConfigError> {
        let config = ConfigStore::load(&source)?;
        info!("Race session started");
        Ok(Self::new(config, Box::new(source)))
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn audio(&self) -> &AudioParameterMapper {
        &self.audio
    }

    pub fn scroller(&self) -> &ParallaxScroller {
        &self.scroller
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn reload_handle(&self) -> ReloadHandle {
        self.reload_handle.clone()
    }

    /// Ask for a reload at the end of the next tick
    pub fn request_reload(&mut self) {
        if self.phase == LoopPhase::Running {
            info!("Reloading config...");
        }
        self.phase = LoopPhase::ReloadPending;
    }

    /// Run one tick. The whole tick reads a single config snapshot; any
    /// pending reload is applied only after it completes.
    ///
    /// The reload fetches from the config source synchronously on the
    /// caller's thread, so with a `FileSource` the frame that applies it
    /// includes a blocking file read and parse.
    pub fn frame(&mut self, input: &InputState, dt: f64) -> FrameOutput {
        if input.reload_requested || self.reload_handle.take() {
            self.request_reload();
        }

        let snapshot = self.config.current();
        let config_generation = self.config.generation();

        self.vehicle = step(&self.vehicle, &snapshot, input, dt);
        let speed = self.vehicle.speed;
        let mut audio = self.audio.update(speed, &snapshot);
        let scroll = self.scroller.advance(speed, dt);
        self.tick += 1;

        let reload = self.finish_tick();
        if let Some(Ok(())) = reload {
            audio = audio.with_reloaded_levels(&self.config.current());
        }

        FrameOutput {
            tick: self.tick,
            config_generation,
            vehicle: self.vehicle,
            wheel_rotation: wheel_rotation(speed, dt),
            scroll,
            audio,
            reload,
        }
    }

    /// Run one tick and forward the result to the sinks
    pub fn run_frame(
        &mut self,
        input: &InputState,
        dt: f64,
        render: &mut dyn RenderSink,
        audio: &mut dyn AudioSink,
    ) -> FrameOutput {
        let output = self.frame(input, dt);
        output.emit(render, audio);
        output
    }

    fn finish_tick(&mut self) -> Option<Result<(), ConfigError>> {
        if self.phase != LoopPhase::ReloadPending {
            return None;
        }
        self.phase = LoopPhase::Running;

        let outcome = self.config.reload(self.source.as_ref());
        if let Err(e) = &outcome {
            warn!(
                "Config reload failed, keeping generation {}: {}",
                self.config.generation(),
                e
            );
        }
        Some(outcome)
    }
}
