//! Spawn gating and per-cube parameter sampling.
//!
//! The live count is the only thing that decides whether a cube may be created.
//! [`LiveCount::try_acquire`] checks the limit and increments in one call, and
//! [`Spawner::try_spawn`] only samples parameters after a slot was acquired, so
//! there is never a cube in flight that the count does not know about.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::CubeConfig;
use crate::viewport::ViewportTracker;

/// Number of cubes between spawn and retirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveCount(u32);

impl LiveCount {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Claim a slot if fewer than `limit` cubes are alive. Returns the spawn
    /// index (the count observed before the increment).
    pub fn try_acquire(&mut self, limit: u32) -> Option<u32> {
        if self.0 >= limit {
            return None;
        }
        let index = self.0;
        self.0 += 1;
        Some(index)
    }

    pub fn release(&mut self) {
        match self.0.checked_sub(1) {
            Some(n) => self.0 = n,
            None => log::warn!("Live count release with no live cubes; ignoring"),
        }
    }
}

/// Everything needed to place a freshly spawned cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeParams {
    /// Live count observed just before this spawn.
    pub spawn_index: u32,
    pub edge_length: f32,
    pub speed_y: f32,
    /// Signed per-frame rotation increments around x and y.
    pub rotation_speed: Vec2,
    pub position: Vec2,
    pub rotation: Vec2,
}

/// Uniform draw from `[min, max)`, or exactly `min` when the range is empty,
/// inverted, or too wide for `max - min` to be finite.
pub fn sample_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min && (max - min).is_finite() {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic spawner; equal seeds give equal parameter sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn try_spawn(
        &mut self,
        config: &CubeConfig,
        live: &mut LiveCount,
        viewport: &ViewportTracker,
    ) -> Option<CubeParams> {
        let spawn_index = live.try_acquire(config.number_of_cubes)?;
        let rng = &mut self.rng;

        let edge_length = sample_range(rng, config.min_edge_length, config.max_edge_length);
        let speed_y = sample_range(rng, config.min_falling_speed, config.max_falling_speed);
        let rotation_x = random_sign(rng)
            * sample_range(rng, config.min_rotation_speed, config.max_rotation_speed);
        let rotation_y = random_sign(rng)
            * sample_range(rng, config.min_rotation_speed, config.max_rotation_speed);

        let half_width = viewport.half_width();
        let x = sample_range(rng, -half_width, half_width);
        let y = -viewport.half_height() - edge_length;

        Some(CubeParams {
            spawn_index,
            edge_length,
            speed_y,
            rotation_speed: Vec2::new(rotation_x, rotation_y),
            position: Vec2::new(x, y),
            rotation: Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()),
        })
    }
}
