// src/utils/progress_bars/progress_callback.rs - Phase reporting for grouping runs

use log::debug;
use std::sync::Arc;
use std::time::Instant;

/// Receives a phase name and optional details such as `"40/120"`.
pub type ProgressCallback = Arc<dyn Fn(String, Option<String>) + Send + Sync>;

/// Reports a phase change through an optional callback
#[macro_export]
macro_rules! update_progress {
    ($callback:expr, $phase:expr) => {
        if let Some(ref cb) = $callback {
            cb($phase.to_string(), None);
        }
    };
    ($callback:expr, $phase:expr, $details:expr) => {
        if let Some(ref cb) = $callback {
            cb($phase.to_string(), Some($details.to_string()));
        }
    };
}

/// Tracks the running phase of a loop and forwards its position to a
/// callback, at most once every `interval` items plus once for the last item.
pub struct ProgressTracker {
    callback: Option<ProgressCallback>,
    current_phase: String,
    interval: usize,
    phase_started: Instant,
}

impl ProgressTracker {
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Self::with_interval(callback, 1)
    }

    pub fn with_interval(callback: Option<ProgressCallback>, interval: usize) -> Self {
        Self {
            callback,
            current_phase: "Initializing".to_string(),
            interval: interval.max(1),
            phase_started: Instant::now(),
        }
    }

    pub fn set_phase(&mut self, phase: &str, details: Option<&str>) {
        self.current_phase = phase.to_string();
        self.phase_started = Instant::now();
        debug!("Entering phase {}", phase);
        if let Some(ref cb) = self.callback {
            cb(phase.to_string(), details.map(str::to_string));
        }
    }

    pub fn update_progress(&self, current: usize, total: usize) {
        if current % self.interval != 0 && current != total {
            return;
        }
        if let Some(ref cb) = self.callback {
            cb(self.current_phase.clone(), Some(format!("{}/{}", current, total)));
        }
    }

    pub fn current_phase(&self) -> &str {
        &self.current_phase
    }

    /// Reports the phase summary together with the time spent in it.
    pub fn finish_phase(&self, summary: &str) {
        if let Some(ref cb) = self.callback {
            let elapsed = self.phase_started.elapsed();
            cb(
                self.current_phase.clone(),
                Some(format!("{} in {:.2}s", summary, elapsed.as_secs_f64())),
            );
        }
    }
}
