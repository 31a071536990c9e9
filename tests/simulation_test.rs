use std::path::PathBuf;
use std::process::{Command, Output};

fn bundled_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/config/config.json")
}

fn run_headless(extra_args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_race_sim"))
        .arg("--config")
        .arg(bundled_config())
        .args(["--ticks", "300", "--delta", "0.05"])
        .args(extra_args)
        .env("RUST_LOG", "warn,race_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the race runs in headless mode without crashing
#[test]
fn test_headless_race_runs() {
    let output = run_headless(&[]);

    assert!(
        output.status.success(),
        "Race failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("RACE COMPLETE"),
        "Race did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that session statistics are logged
#[test]
fn test_race_statistics_logged() {
    let output = run_headless(&[]);
    assert!(output.status.success(), "Race failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for statistic in [
        "Frames:",
        "Distance:",
        "Top speed:",
        "Average speed:",
        "Config reloads:",
    ] {
        assert!(stderr.contains(statistic), "Missing '{}' statistic", statistic);
    }

    // The bundled config tops out at 300 and the demo lap holds the throttle long enough
    let top_speed_line = stderr
        .lines()
        .find(|line| line.contains("Top speed:"))
        .expect("Could not find 'Top speed' line");
    let top_speed: f64 = top_speed_line
        .split("Top speed:")
        .nth(1)
        .and_then(|s| s.trim().parse().ok())
        .expect("Could not parse top speed");
    assert_eq!(top_speed, 300.0, "Demo lap should reach the configured top speed");
}

/// Test that a reload requested mid-race is applied
#[test]
fn test_reload_mid_race() {
    let output = run_headless(&["--reload-at", "10"]);
    assert!(output.status.success(), "Race failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Config reloads: 1 applied, 0 failed"),
        "Reload was not applied. stderr: {}",
        stderr
    );
}

/// Test that every frame is emitted as a JSON line
#[test]
fn test_json_frames() {
    let output = run_headless(&["--json"]);
    assert!(output.status.success(), "Race failed to run");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("frame line should be JSON"))
        .collect();

    assert_eq!(frames.len(), 300);
    assert_eq!(frames[0]["tick"], serde_json::json!(1));
    assert!(frames
        .iter()
        .all(|frame| frame["vehicle"]["speed"].as_f64().is_some()));
}

/// Test that a missing config file is a startup error
#[test]
fn test_missing_config_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_race_sim"))
        .args(["--config", "does/not/exist.json", "--ticks", "1"])
        .output()
        .expect("Failed to execute simulation");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "stderr: {}", stderr);
}

/// Test that a frame delta which is not finite and positive is rejected at startup
#[test]
fn test_invalid_delta_rejected() {
    for delta in ["--delta=NaN", "--delta=-0.5", "--delta=0", "--delta=inf"] {
        let output = Command::new(env!("CARGO_BIN_EXE_race_sim"))
            .arg("--config")
            .arg(bundled_config())
            .args(["--ticks", "2", "--json", delta])
            .output()
            .expect("Failed to execute simulation");

        assert!(!output.status.success(), "{} was accepted", delta);
        assert!(output.stdout.is_empty(), "{} produced frames", delta);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--delta"), "stderr: {}", stderr);
    }
}
