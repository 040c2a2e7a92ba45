//! Time management utilities

use crate::config::SimulationConfig;

/// Fixed-step accumulator for driving the simulation
///
/// Collects variable frame times and hands out a whole number of fixed
/// simulation steps, carrying the leftover into the next frame.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    max_steps: u32,
    accumulator: f32,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create a timestep from a simulation configuration
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            step: config.fixed_dt(),
            max_steps: config.max_steps_per_frame.max(1),
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Length of one simulation step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Total number of steps handed out so far
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Feed one frame's elapsed time and return how many fixed steps to run.
    ///
    /// When the frame took longer than `max_steps` worth of steps the excess
    /// time is dropped so a slow frame cannot snowball.
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        if !frame_time.is_finite() || frame_time < 0.0 {
            log::warn!("FixedTimestep::advance({frame_time}) ignored");
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            log::debug!("Dropping {:.4}s of simulation time", self.accumulator);
            self.accumulator = 0.0;
        }

        self.total_steps += u64::from(steps);
        steps
    }
}
