use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use race_sim::simulation::{DriveScript, FileSource, FrameLoop, RaceStats};

#[derive(Parser)]
#[command(name = "race_sim")]
#[command(about = "Race view simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of frames to run in headless mode
    #[arg(long, default_value = "720")]
    ticks: u64,

    /// Time delta per frame in seconds
    #[arg(long, default_value = "0.016666", value_parser = positive_delta)]
    delta: f64,

    /// Path to the JSON config document
    #[arg(long, default_value = "assets/config/config.json")]
    config: PathBuf,

    /// Request a config reload on this frame (headless mode)
    #[arg(long)]
    reload_at: Option<u64>,

    /// Print every frame as a JSON line on stdout (headless mode)
    #[arg(long)]
    json: bool,
}

/// Frame deltas must be finite and above zero
fn positive_delta(value: &str) -> std::result::Result<f64, String> {
    let delta: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if !delta.is_finite() || delta <= 0.0 {
        return Err(format!("`{value}` is not a finite delta above zero"));
    }
    Ok(delta)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        return run_with_ui(&cli.config);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,race_sim=info"),
    )
    .init();
    run_headless(&cli)
}

fn start_session(config: &Path) -> Result<FrameLoop> {
    FrameLoop::start(FileSource::new(config))
        .with_context(|| format!("Failed to load config from {}", config.display()))
}

/// Run a scripted race session in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let mut race = start_session(&cli.config)?;
    let script = DriveScript::demo_lap();
    let mut stats = RaceStats::default();

    info!(
        "Running {} frames at {:.4}s per frame ({:.1}s scripted)",
        cli.ticks,
        cli.delta,
        script.duration()
    );

    // Log a status line once per simulated second
    let frames_per_second = (1.0 / cli.delta).round().max(1.0) as u64;

    for frame in 1..=cli.ticks {
        let elapsed = (frame - 1) as f64 * cli.delta;
        let mut input = script.input_at(elapsed);
        input.reload_requested = cli.reload_at == Some(frame);

        let output = race.frame(&input, cli.delta);
        stats.record(&output, cli.delta);

        if cli.json {
            println!(
                "{}",
                serde_json::to_string(&output).context("Failed to encode frame")?
            );
        }
        if frame % frames_per_second == 0 || output.reload.is_some() {
            info!("[{:.1}s] {}", stats.elapsed_time, output.summary().join(" | "));
        }
    }

    stats.log_summary();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: &Path) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    let race = start_session(config)?;

    println!("Starting Race Sim UI...");
    println!();
    println!("Controls:");
    println!("  Up/Down     - Accelerate / brake");
    println!("  Left/Right  - Change lane");
    println!("  Space       - Handbrake");
    println!("  R           - Reload config");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,race_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Race Sim".into(),
                        resolution: (800, 600).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(race_sim::ui::RaceLoopResource(race))
        .add_plugins(race_sim::ui::RaceViewPlugin)
        .run();

    Ok(())
}

#[cfg(not(feature = "ui"))]
fn run_with_ui(_config: &Path) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}
