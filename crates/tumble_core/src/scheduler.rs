//! Central registry of per-cube tick tasks.
//!
//! A cube does not reschedule itself. Spawning registers one task; every frame
//! the scheduler hands back the tasks whose start time has passed, and the task
//! stays registered (ticking once per frame) until it is cancelled on
//! retirement. A task ticks at most once per frame time: `mark_ticked` records
//! the frame it last ran in. `cancel_all` empties the registry and bumps the epoch, which turns
//! any [`TaskHandle`] still held by a caller into a stale no-op.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::cube::CubeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    pub cube: CubeId,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    start_at: Duration,
    epoch: u64,
    last_tick: Option<Duration>,
}

impl Task {
    fn is_due(&self, now: Duration) -> bool {
        self.start_at <= now && self.last_tick.map_or(true, |last| last < now)
    }
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    tasks: BTreeMap<CubeId, Task>,
    epoch: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Register `cube` to start ticking on the first frame at or after `start_at`.
    pub fn schedule(&mut self, cube: CubeId, start_at: Duration) -> TaskHandle {
        let epoch = self.epoch;
        self.tasks.insert(
            cube,
            Task {
                start_at,
                epoch,
                last_tick: None,
            },
        );
        TaskHandle { cube, epoch }
    }

    /// Handles that should tick this frame, in cube-id order.
    pub fn due(&self, now: Duration) -> Vec<TaskHandle> {
        self.tasks
            .iter()
            .filter(|(_, task)| task.is_due(now))
            .map(|(&cube, task)| TaskHandle {
                cube,
                epoch: task.epoch,
            })
            .collect()
    }

    /// Every registered handle, due or not.
    pub fn handles(&self) -> Vec<TaskHandle> {
        self.tasks
            .iter()
            .map(|(&cube, task)| TaskHandle {
                cube,
                epoch: task.epoch,
            })
            .collect()
    }

    /// Pending, past its start time, and not yet ticked at `now`.
    pub fn is_due(&self, handle: TaskHandle, now: Duration) -> bool {
        self.is_pending(handle)
            && self
                .tasks
                .get(&handle.cube)
                .is_some_and(|task| task.is_due(now))
    }

    pub fn mark_ticked(&mut self, handle: TaskHandle, now: Duration) {
        if !self.is_pending(handle) {
            return;
        }
        if let Some(task) = self.tasks.get_mut(&handle.cube) {
            task.last_tick = Some(now);
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        handle.epoch == self.epoch
            && self
                .tasks
                .get(&handle.cube)
                .is_some_and(|task| task.epoch == handle.epoch)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if !self.is_pending(handle) {
            return false;
        }
        self.tasks.remove(&handle.cube).is_some()
    }

    /// Drop every task and invalidate all outstanding handles. Returns how many
    /// tasks were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        self.epoch += 1;
        cancelled
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
