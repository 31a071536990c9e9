//! Systems for driving the race session and syncing Bevy entities with it

use bevy::audio::{AudioSink, AudioSinkPlayback, Volume};
use bevy::prelude::*;

use super::components::{
    AudioState, DebugLines, DebugText, EngineLoop, MusicLoop, ParallaxStrip, RaceLoopResource,
    RenderState, VehicleContainer, Wheel,
};
use super::input::race_input;
use super::world::STRIP_WIDTH;

/// Screen row (lane offset) that maps to y = 0, for an 800x600 window
const SCREEN_HALF_HEIGHT: f64 = 300.0;

/// Lane offsets grow downwards; Bevy's y axis grows upwards
pub fn lane_to_screen_y(lateral_offset: f64) -> f32 {
    (SCREEN_HALF_HEIGHT - lateral_offset) as f32
}

/// System to run one race tick per rendered frame
pub fn tick_race(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut race: ResMut<RaceLoopResource>,
    mut render: ResMut<RenderState>,
    mut audio: ResMut<AudioState>,
    mut debug: ResMut<DebugLines>,
) {
    let input = race_input(&keyboard);
    let output = race
        .0
        .run_frame(&input, time.delta_secs_f64(), &mut *render, &mut *audio);
    debug.0 = output.summary();
}

/// System to place and tilt the vehicle and spin its wheels
pub fn sync_vehicle(
    render: Res<RenderState>,
    mut vehicle_query: Query<&mut Transform, With<VehicleContainer>>,
    mut wheel_query: Query<&mut Transform, (With<Wheel>, Without<VehicleContainer>)>,
) {
    for mut transform in vehicle_query.iter_mut() {
        transform.translation.y = lane_to_screen_y(render.pose.lateral_offset);
        // Positive tilt leans clockwise on screen
        transform.rotation = Quat::from_rotation_z(-render.pose.tilt as f32);
    }
    for mut transform in wheel_query.iter_mut() {
        transform.rotation = Quat::from_rotation_z(-render.wheel_angle as f32);
    }
}

/// System to scroll the background tiles
pub fn sync_parallax(
    render: Res<RenderState>,
    mut strip_query: Query<(&ParallaxStrip, &mut Transform)>,
) {
    let width = f64::from(STRIP_WIDTH);
    for (strip, mut transform) in strip_query.iter_mut() {
        let wrapped = render.offsets[strip.layer.index()].rem_euclid(width);
        transform.translation.x = (f64::from(strip.slot) * width - wrapped) as f32;
    }
}

/// System to apply engine and music levels to the looping sounds
pub fn sync_audio(
    audio: Res<AudioState>,
    mut engine_query: Query<&mut AudioSink, With<EngineLoop>>,
    mut music_query: Query<&mut AudioSink, (With<MusicLoop>, Without<EngineLoop>)>,
) {
    for mut sink in engine_query.iter_mut() {
        sink.set_speed(audio.engine_pitch as f32);
        sink.set_volume(Volume::Linear(audio.engine_volume as f32));
    }
    for mut sink in music_query.iter_mut() {
        sink.set_speed(audio.music_rate as f32);
        sink.set_volume(Volume::Linear(audio.music_volume as f32));
    }
}

/// System to refresh the debug overlay
pub fn update_debug_text(
    lines: Res<DebugLines>,
    mut text_query: Query<&mut Text, With<DebugText>>,
) {
    if !lines.is_changed() {
        return;
    }
    for mut text in text_query.iter_mut() {
        text.0 = lines.0.join("\n");
    }
}
