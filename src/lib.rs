//! Race Simulation Library
//!
//! The vehicle physics and audio/parallax coupling behind a racing game's
//! race view. Runs headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
