//! UI module that presents the race session using Bevy
//!
//! This module is purely presentation - all simulation logic is in the `simulation` module.
//! Keyboard state is sampled into an `InputState`, the session runs once per frame, and
//! its render and audio output is applied to sprites and looping sounds.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{AudioState, RaceLoopResource, RenderState};
pub use world::{ENGINE_LOOP_ASSET, MUSIC_LOOP_ASSET};

use components::DebugLines;
use input::handle_input;
use sync::{sync_audio, sync_parallax, sync_vehicle, tick_race, update_debug_text};
use world::setup_race_view;

/// Plugin to register all race view systems. Expects a `RaceLoopResource` to be inserted.
pub struct RaceViewPlugin;

impl Plugin for RaceViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>()
            .init_resource::<AudioState>()
            .init_resource::<DebugLines>()
            .add_systems(Startup, setup_race_view)
            .add_systems(
                Update,
                (
                    handle_input,
                    tick_race,
                    (sync_vehicle, sync_parallax, sync_audio, update_debug_text).after(tick_race),
                ),
            );
    }
}
