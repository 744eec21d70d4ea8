use std::time::Duration;

/// Start-up window during which the initial population enters on a stagger.
///
/// This is a one-shot deadline: `poll` flips `warmed_up` the first time it sees
/// a time at or past `started_at + duration`, and never again.
#[derive(Debug, Clone)]
pub struct RampWindow {
    started_at: Duration,
    duration: Duration,
    warmed_up: bool,
}

impl RampWindow {
    pub fn start(now: Duration, duration_ms: u64) -> Self {
        Self {
            started_at: now,
            duration: Duration::from_millis(duration_ms),
            warmed_up: false,
        }
    }

    pub fn is_warmed_up(&self) -> bool {
        self.warmed_up
    }

    /// Returns true only on the call that ends the window.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.warmed_up || now.saturating_sub(self.started_at) < self.duration {
            return false;
        }
        self.warmed_up = true;
        true
    }

    /// Delay before the first tick of the cube spawned with `spawn_index`.
    pub fn stagger_delay(&self, spawn_index: u32, number_of_cubes: u32) -> Duration {
        if self.warmed_up || number_of_cubes == 0 {
            return Duration::ZERO;
        }
        self.duration / number_of_cubes * spawn_index
    }
}
