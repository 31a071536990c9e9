//! Session statistics gathered from frame outputs

use log::info;

use super::frame_loop::FrameOutput;

/// Running totals for one race session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceStats {
    pub frames: u64,
    pub elapsed_time: f64,
    pub distance: f64,
    pub top_speed: f64,
    pub reloads_applied: u32,
    pub reloads_failed: u32,
}

impl RaceStats {
    pub fn record(&mut self, output: &FrameOutput, dt: f64) {
        let speed = output.vehicle.speed;
        self.frames += 1;
        self.elapsed_time += dt;
        self.distance += speed * dt;
        self.top_speed = self.top_speed.max(speed);
        match &output.reload {
            Some(Ok(())) => self.reloads_applied += 1,
            Some(Err(_)) => self.reloads_failed += 1,
            None => {}
        }
    }

    pub fn average_speed(&self) -> f64 {
        if self.elapsed_time > 0.0 {
            self.distance / self.elapsed_time
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        info!("=== RACE COMPLETE ===");
        info!("Frames: {}", self.frames);
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        info!("Distance: {:.1}", self.distance);
        info!("Top speed: {:.1}", self.top_speed);
        info!("Average speed: {:.1}", self.average_speed());
        info!("Config reloads: {} applied, {} failed", self.reloads_applied, self.reloads_failed);
    }
}
