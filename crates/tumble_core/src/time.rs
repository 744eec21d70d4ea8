use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;
const LONG_FRAME: Duration = Duration::from_millis(250);

/// Wall-clock bookkeeping for the per-frame loop.
///
/// Cube motion is expressed per displayed frame, so nothing here scales
/// velocities. The clock only supplies "time since start" for the ramp window
/// and stagger delays, plus a smoothed FPS figure for diagnostics.
pub struct FrameClock {
    started: Instant,
    last_instant: Instant,
    pub real_dt: Duration,
    pub frame_count: u64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            started: start,
            last_instant: start,
            real_dt: Duration::ZERO,
            frame_count: 0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) -> Duration {
        self.begin_frame_at(Instant::now())
    }

    /// Record a frame boundary at `now` and return the time since start.
    pub fn begin_frame_at(&mut self, now: Instant) -> Duration {
        self.real_dt = now.saturating_duration_since(self.last_instant);
        self.last_instant = now;
        self.frame_count += 1;

        if self.real_dt > LONG_FRAME {
            log::warn!(
                "Frame took {:.1}ms; cubes only move once per displayed frame",
                self.real_dt.as_secs_f64() * 1000.0
            );
        }

        self.fps_samples[self.fps_sample_index] = self.real_dt.as_secs_f64();
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        self.elapsed()
    }

    /// Time from clock start to the most recent frame boundary.
    pub fn elapsed(&self) -> Duration {
        self.last_instant.saturating_duration_since(self.started)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
