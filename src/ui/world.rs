//! Scene setup for the race view: camera, background layers, vehicle, audio

use bevy::audio::Volume;
use bevy::prelude::*;

use super::components::{
    DebugText, EngineLoop, MusicLoop, ParallaxStrip, RaceLoopResource, VehicleContainer, Wheel,
};
use super::sync::lane_to_screen_y;
use crate::simulation::ParallaxLayer;

/// Width of one background tile in pixels
pub const STRIP_WIDTH: f32 = 1024.0;

/// Looping engine sample, relative to the asset folder
pub const ENGINE_LOOP_ASSET: &str = "audio/engine.wav";
/// Looping background track, relative to the asset folder
pub const MUSIC_LOOP_ASSET: &str = "audio/music.wav";

/// Vertical band (centre y, height) and colour of each layer
fn layer_style(layer: ParallaxLayer) -> (f32, f32, Color) {
    match layer {
        ParallaxLayer::Clouds => (220.0, 160.0, Color::srgb(0.55, 0.7, 0.9)),
        ParallaxLayer::Mountains => (110.0, 120.0, Color::srgb(0.35, 0.35, 0.45)),
        ParallaxLayer::Trees => (30.0, 80.0, Color::srgb(0.15, 0.4, 0.2)),
        ParallaxLayer::Road => (-160.0, 280.0, Color::srgb(0.25, 0.25, 0.25)),
    }
}

/// System to build the race scene
pub fn setup_race_view(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    race: Res<RaceLoopResource>,
) {
    commands.spawn(Camera2d);

    // Far layers first so nearer ones draw on top
    for (depth, layer) in ParallaxLayer::ALL.into_iter().enumerate() {
        let (y, height, color) = layer_style(layer);
        let z = depth as f32;
        for slot in 0..2u8 {
            commands
                .spawn((
                    ParallaxStrip { layer, slot },
                    Sprite::from_color(color, Vec2::new(STRIP_WIDTH, height)),
                    Transform::from_xyz(f32::from(slot) * STRIP_WIDTH, y, z),
                ))
                .with_children(|parent| {
                    // Seam marker so scrolling is visible on flat colour
                    parent.spawn((
                        Sprite::from_color(
                            Color::srgba(0.0, 0.0, 0.0, 0.25),
                            Vec2::new(24.0, height),
                        ),
                        Transform::from_xyz(-STRIP_WIDTH / 2.0 + 12.0, 0.0, 0.1),
                    ));
                });
        }
    }

    let lateral_offset = race.0.vehicle().lateral_offset;
    commands
        .spawn((
            VehicleContainer,
            Transform::from_xyz(0.0, lane_to_screen_y(lateral_offset), 10.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Sprite::from_color(Color::srgb(0.8, 0.15, 0.15), Vec2::new(180.0, 60.0)),
                Transform::default(),
            ));
            parent.spawn((
                Sprite::from_color(Color::srgb(0.1, 0.1, 0.1), Vec2::new(60.0, 8.0)),
                Transform::from_xyz(0.0, 20.0, 0.2),
            ));
            for x in [-50.0, 45.0] {
                parent.spawn((
                    Wheel,
                    Sprite::from_color(Color::srgb(0.6, 0.6, 0.65), Vec2::new(36.0, 36.0)),
                    Transform::from_xyz(x, -20.0, 0.1),
                ));
            }
        });

    let config = race.0.config().current();
    commands.spawn((
        EngineLoop,
        AudioPlayer::new(asset_server.load(ENGINE_LOOP_ASSET)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(config.engine.min_volume as f32)),
    ));
    commands.spawn((
        MusicLoop,
        AudioPlayer::new(asset_server.load(MUSIC_LOOP_ASSET)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(config.music.volume as f32)),
    ));

    commands.spawn((
        DebugText,
        Text::new("Press R to reload config"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
}
