//! Scripted driver input for headless race sessions

use super::types::InputState;

/// Hold `input` until `until` seconds of session time have elapsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrivePhase {
    pub until: f64,
    pub input: InputState,
}

/// A timeline of control inputs. Time past the last phase is idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriveScript {
    phases: Vec<DrivePhase>,
}

impl DriveScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a phase lasting `duration` seconds
    pub fn then(mut self, duration: f64, input: InputState) -> Self {
        let start = self.duration();
        self.phases.push(DrivePhase {
            until: start + duration,
            input,
        });
        self
    }

    /// Total scripted time in seconds
    pub fn duration(&self) -> f64 {
        self.phases.last().map_or(0.0, |phase| phase.until)
    }

    /// Input held at `elapsed` seconds into the session
    pub fn input_at(&self, elapsed: f64) -> InputState {
        self.phases
            .iter()
            .find(|phase| elapsed < phase.until)
            .map_or_else(InputState::idle, |phase| phase.input)
    }

    /// A short lap exercising every control
    pub fn demo_lap() -> Self {
        Self::new()
            .then(3.0, InputState::accelerating())
            .then(0.5, InputState::accelerating().with_steer_left())
            .then(1.0, InputState::accelerating().with_steer_right())
            .then(1.5, InputState::idle())
            .then(0.5, InputState::braking())
            .then(2.0, InputState::accelerating())
            .then(1.0, InputState::handbraking())
            .then(2.0, InputState::idle())
    }
}
