//! Per-run statistics

use log::info;

/// Counters for the current run, cleared on restart
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Frames advanced while running
    pub frames: u64,
    /// Simulated seconds advanced while running
    pub elapsed_time: f32,
    /// Simulated time at which the run halted
    pub halted_at: Option<f32>,
    /// Closest pixel distance seen between any two vehicles
    pub min_separation: Option<f32>,
    /// Restarts since the program started (survives restarts)
    pub restarts: u32,
}

impl RunStats {
    pub fn record_frame(&mut self, delta_secs: f32, separation: Option<f32>) {
        self.frames += 1;
        self.elapsed_time += delta_secs;
        if let Some(separation) = separation {
            self.min_separation = Some(
                self.min_separation
                    .map_or(separation, |min| min.min(separation)),
            );
        }
    }

    /// Start a new run, keeping the restart count
    pub fn restart(&mut self) {
        *self = Self {
            restarts: self.restarts + 1,
            ..Self::default()
        };
    }

    pub fn log_report(&self) {
        info!("=== SIMULATION HALTED ===");
        info!("Frames: {}", self.frames);
        info!("Elapsed time: {:.2}s", self.elapsed_time);
        if let Some(separation) = self.min_separation {
            info!("Minimum separation: {:.1}px", separation);
        }
        info!("Restarts: {}", self.restarts);
    }
}
