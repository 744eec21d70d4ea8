//! Scene lifecycle: mounting a render context, driving frames, tearing down.
//!
//! [`Animator`] owns all engine state. While mounted it also owns a [`Stage`]:
//! the backend (render context), the camera-fitting [`ViewportTracker`] and the
//! scene graph of live cubes. Unmounting releases every cube's resources, shuts
//! the backend down and cancels every scheduled task, in that order. Dropping a
//! mounted `Animator` runs the same teardown.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::backend::{DrawItem, RenderBackend, RenderFrame};
use crate::config::{CubeConfig, Rgb};
use crate::cube::{Cube, CubeId};
use crate::driver::{advance_cube, Motion, TickOutcome};
use crate::ramp::RampWindow;
use crate::scheduler::{FrameScheduler, TaskHandle};
use crate::spawner::{LiveCount, Spawner};
use crate::viewport::ViewportTracker;

/// What the host must do after [`Animator::reconfigure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconfigure {
    /// Applied in place.
    Applied,
    /// The render context depends on a changed option; unmount and mount a fresh backend.
    Remount,
}

/// Summary of one [`Animator::frame`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: Option<CubeId>,
    pub ticked: usize,
    pub retired: usize,
    pub rendered: bool,
}

struct Stage<B: RenderBackend> {
    backend: B,
    viewport: ViewportTracker,
    scene: BTreeMap<CubeId, Cube<B::Handle>>,
    needs_redraw: bool,
}

impl<B: RenderBackend> Stage<B> {
    fn advance(&mut self, id: CubeId) -> Option<Motion> {
        let cube = self.scene.get_mut(&id)?;
        Some(advance_cube(cube, &self.viewport))
    }

    fn render(&mut self, clear_color: Rgb) {
        let items: Vec<DrawItem<B::Handle>> = self
            .scene
            .values()
            .map(|cube| DrawItem {
                handle: cube.handle,
                model: cube.model_matrix(),
            })
            .collect();
        self.backend.render(&RenderFrame {
            view_proj: self.viewport.projection(),
            clear_color,
            items: &items,
        });
        self.needs_redraw = false;
    }

    fn remove(&mut self, id: CubeId) -> bool {
        match self.scene.remove(&id) {
            Some(cube) => {
                self.backend.release_cube(cube.handle);
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }
}

pub struct Animator<B: RenderBackend> {
    config: CubeConfig,
    spawner: Spawner,
    live: LiveCount,
    scheduler: FrameScheduler,
    ramp: RampWindow,
    stage: Option<Stage<B>>,
    next_id: u64,
}

impl<B: RenderBackend> Animator<B> {
    pub fn new(config: CubeConfig, spawner: Spawner) -> Self {
        let ramp = RampWindow::start(Duration::ZERO, config.initial_duration);
        Self {
            config,
            spawner,
            live: LiveCount::default(),
            scheduler: FrameScheduler::new(),
            ramp,
            stage: None,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.stage.is_some()
    }

    pub fn live_count(&self) -> u32 {
        self.live.get()
    }

    pub fn is_warmed_up(&self) -> bool {
        self.ramp.is_warmed_up()
    }

    /// Number of cubes in the scene graph, including ones still waiting out
    /// their stagger delay.
    pub fn scene_len(&self) -> usize {
        self.stage.as_ref().map_or(0, |stage| stage.scene.len())
    }

    pub fn cube(&self, id: CubeId) -> Option<&Cube<B::Handle>> {
        self.stage.as_ref()?.scene.get(&id)
    }

    pub fn viewport(&self) -> Option<&ViewportTracker> {
        self.stage.as_ref().map(|stage| &stage.viewport)
    }

    pub fn backend(&self) -> Option<&B> {
        self.stage.as_ref().map(|stage| &stage.backend)
    }

    /// Take ownership of a freshly created render context sized `width` x `height`.
    /// Any previous context is torn down first.
    pub fn mount(&mut self, backend: B, width: u32, height: u32, now: Duration) {
        if self.stage.is_some() {
            log::info!("Remounting: tearing down the previous render context first");
            self.unmount();
        }
        self.ramp = RampWindow::start(now, self.config.initial_duration);
        self.stage = Some(Stage {
            backend,
            viewport: ViewportTracker::new(width, height, self.config.max_edge_length),
            scene: BTreeMap::new(),
            needs_redraw: true,
        });
        log::info!(
            "Mounted {}x{} (target {} cubes, ramp {}ms)",
            width,
            height,
            self.config.number_of_cubes,
            self.config.initial_duration
        );
    }

    /// Release every cube, shut the render context down and cancel all tasks.
    /// Returns how many cubes were released. Safe to call when not mounted.
    pub fn unmount(&mut self) -> usize {
        let Some(mut stage) = self.stage.take() else {
            return 0;
        };
        let cancelled = self.scheduler.cancel_all();

        let released = stage.scene.len();
        for (_, cube) in std::mem::take(&mut stage.scene) {
            stage.backend.release_cube(cube.handle);
            self.live.release();
        }
        stage.backend.shutdown();

        if self.live.get() != 0 {
            log::warn!(
                "Live count was {} after releasing the scene; resetting",
                self.live.get()
            );
            self.live = LiveCount::default();
        }
        log::info!("Unmounted: released {released} cubes, cancelled {cancelled} tasks");
        released
    }

    /// Surface resize notification. Ignored while unmounted.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(stage) = self.stage.as_mut() else {
            log::trace!("Resize to {width}x{height} ignored: nothing mounted");
            return;
        };
        stage.viewport.resize(width, height);
        stage.backend.resize(width, height);
        stage.needs_redraw = true;
        log::info!("Viewport resized to {width}x{height}");
    }

    pub fn reconfigure(&mut self, config: CubeConfig) -> Reconfigure {
        let remount = config.requires_remount(&self.config);
        let depth_changed = config.max_edge_length != self.config.max_edge_length;
        self.config = config;

        let Some(stage) = self.stage.as_mut() else {
            return Reconfigure::Applied;
        };
        if remount {
            return Reconfigure::Remount;
        }
        if depth_changed {
            stage.viewport.rescale_depth(self.config.max_edge_length);
            stage.needs_redraw = true;
        }
        Reconfigure::Applied
    }

    /// One displayed frame: maybe spawn, tick every due cube, render once,
    /// then retire the cubes that fell out on this tick.
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        let mut report = FrameReport::default();
        let Some(stage) = self.stage.as_mut() else {
            return report;
        };

        if self.ramp.poll(now) {
            log::info!("Ramp window elapsed; new cubes start immediately");
        }

        if let Some(params) =
            self.spawner
                .try_spawn(&self.config, &mut self.live, &stage.viewport)
        {
            let id = CubeId(self.next_id);
            self.next_id += 1;
            let handle = stage
                .backend
                .create_cube(params.edge_length, self.config.edge_color);
            stage.scene.insert(id, Cube::new(id, handle, &params));
            let delay = self
                .ramp
                .stagger_delay(params.spawn_index, self.config.number_of_cubes);
            self.scheduler.schedule(id, now + delay);
            log::debug!(
                "Spawned cube {} (edge {:.0}px, speed {:.2}px/frame, starts in {}ms)",
                id.0,
                params.edge_length,
                params.speed_y,
                delay.as_millis()
            );
            report.spawned = Some(id);
        }

        let mut exited = Vec::new();
        for task in self.scheduler.due(now) {
            self.scheduler.mark_ticked(task, now);
            match stage.advance(task.cube) {
                Some(Motion::Falling) => {}
                Some(Motion::Exited) => exited.push(task),
                None => {
                    log::warn!("Task for cube {} has no scene entry", task.cube.0);
                    self.scheduler.cancel(task);
                    continue;
                }
            }
            report.ticked += 1;
        }

        if report.ticked > 0 || stage.needs_redraw {
            stage.render(self.config.background_color);
            report.rendered = true;
        }

        for task in exited {
            retire(stage, &mut self.scheduler, &mut self.live, task);
            report.retired += 1;
        }
        report
    }

    /// Run a single continuation outside the frame loop: tick, render, maybe retire.
    /// A continuation from before the last unmount is a no-op, and so is one
    /// that is not due at `now` (stagger pending or already ticked this frame).
    pub fn tick_task(&mut self, task: TaskHandle, now: Duration) -> TickOutcome {
        let Some(stage) = self.stage.as_mut() else {
            log::trace!("Stale continuation for cube {}: nothing mounted", task.cube.0);
            return TickOutcome::Stale;
        };
        if !self.scheduler.is_pending(task) {
            log::trace!("Stale continuation for cube {}", task.cube.0);
            return TickOutcome::Stale;
        }
        if !self.scheduler.is_due(task, now) {
            return TickOutcome::Waiting;
        }
        self.scheduler.mark_ticked(task, now);
        let Some(motion) = stage.advance(task.cube) else {
            return TickOutcome::Stale;
        };
        stage.render(self.config.background_color);
        match motion {
            Motion::Falling => TickOutcome::Alive,
            Motion::Exited => {
                retire(stage, &mut self.scheduler, &mut self.live, task);
                TickOutcome::Retired
            }
        }
    }

    /// Handles of every task currently registered with the scheduler.
    pub fn pending_tasks(&self) -> Vec<TaskHandle> {
        self.scheduler.handles()
    }

    /// Whether the next frame can change anything on screen. False when nothing
    /// is mounted, the surface has no area, or no cube is scheduled, none can
    /// spawn and no redraw is owed (`numberOfCubes == 0` after the first frame).
    pub fn wants_frame(&self) -> bool {
        let Some(stage) = self.stage.as_ref() else {
            return false;
        };
        if stage.viewport.width() == 0 || stage.viewport.height() == 0 {
            return false;
        }
        stage.needs_redraw
            || !self.scheduler.is_empty()
            || self.live.get() < self.config.number_of_cubes
    }
}

impl<B: RenderBackend> Drop for Animator<B> {
    fn drop(&mut self) {
        if self.stage.is_some() {
            self.unmount();
        }
    }
}

fn retire<B: RenderBackend>(
    stage: &mut Stage<B>,
    scheduler: &mut FrameScheduler,
    live: &mut LiveCount,
    task: TaskHandle,
) {
    scheduler.cancel(task);
    if stage.remove(task.cube) {
        live.release();
        log::debug!("Retired cube {} ({} live)", task.cube.0, live.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Ledger {
        next: u32,
        live: HashSet<u32>,
        created: usize,
        released: Vec<u32>,
        renders: Vec<usize>,
        resizes: Vec<(u32, u32)>,
        shutdowns: usize,
    }

    /// In-memory backend that records every call.
    struct RecordingBackend(Rc<RefCell<Ledger>>);

    impl RenderBackend for RecordingBackend {
        type Handle = u32;

        fn create_cube(&mut self, _edge_length: f32, _edge_color: Rgb) -> u32 {
            let mut ledger = self.0.borrow_mut();
            let handle = ledger.next;
            ledger.next += 1;
            ledger.created += 1;
            ledger.live.insert(handle);
            handle
        }

        fn release_cube(&mut self, handle: u32) {
            let mut ledger = self.0.borrow_mut();
            assert!(ledger.live.remove(&handle), "double release of {handle}");
            ledger.released.push(handle);
        }

        fn render(&mut self, frame: &RenderFrame<'_, u32>) {
            let mut ledger = self.0.borrow_mut();
            assert_eq!(ledger.shutdowns, 0, "render after shutdown");
            for item in frame.items {
                assert!(ledger.live.contains(&item.handle), "drawing released cube");
            }
            ledger.renders.push(frame.items.len());
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.0.borrow_mut().resizes.push((width, height));
        }

        fn shutdown(&mut self) {
            let mut ledger = self.0.borrow_mut();
            assert!(ledger.live.is_empty(), "shutdown with live cube resources");
            ledger.shutdowns += 1;
        }
    }

    fn backend() -> (RecordingBackend, Rc<RefCell<Ledger>>) {
        let ledger = Rc::new(RefCell::new(Ledger::default()));
        (RecordingBackend(ledger.clone()), ledger)
    }

    fn fixed_config(number_of_cubes: u32) -> CubeConfig {
        CubeConfig {
            number_of_cubes,
            min_edge_length: 100.0,
            max_edge_length: 100.0,
            min_falling_speed: 10.0,
            max_falling_speed: 10.0,
            initial_duration: 0,
            ..CubeConfig::default()
        }
    }

    fn frame_time(frame: u64) -> Duration {
        Duration::from_millis(16 * frame)
    }

    #[test]
    fn single_cube_scenario_retires_on_tick_41() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(1));
        animator.mount(backend, 300, 200, Duration::ZERO);

        let first = animator.frame(frame_time(0));
        let id = first.spawned.expect("spawns on the first frame");
        assert_eq!(first.ticked, 1);
        assert_eq!(animator.cube(id).unwrap().position.y, -190.0);

        // ticks 2..=40
        for f in 1..40 {
            let report = animator.frame(frame_time(f));
            assert_eq!(report.retired, 0, "frame {f}");
            assert_eq!(animator.live_count(), 1);
        }
        assert_eq!(animator.cube(id).unwrap().position.y, 200.0);
        let report = animator.frame(frame_time(40));
        assert_eq!(report.retired, 1);
        assert!(report.rendered);
        assert_eq!(animator.live_count(), 0);
        assert!(animator.cube(id).is_none());
        assert_eq!(ledger.borrow().released, vec![0]);
    }

    #[test]
    fn live_count_never_exceeds_target() {
        let (backend, ledger) = backend();
        let config = CubeConfig {
            number_of_cubes: 4,
            min_falling_speed: 40.0,
            max_falling_speed: 90.0,
            initial_duration: 200,
            ..CubeConfig::default()
        };
        let mut animator = Animator::new(config, Spawner::with_seed(99));
        animator.mount(backend, 640, 480, Duration::ZERO);

        let mut retired = 0;
        for f in 0..2000 {
            let report = animator.frame(frame_time(f));
            retired += report.retired;
            assert!(animator.live_count() <= 4);
            assert_eq!(animator.live_count() as usize, animator.scene_len());
        }
        assert!(retired > 10, "cubes should cycle, got {retired}");
        let ledger = ledger.borrow();
        assert_eq!(ledger.created, retired + animator.live_count() as usize);
    }

    #[test]
    fn zero_cubes_never_spawn() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(0), Spawner::with_seed(2));
        animator.mount(backend, 300, 200, Duration::ZERO);
        for f in 0..500 {
            assert_eq!(animator.frame(frame_time(f)).spawned, None);
        }
        assert_eq!(ledger.borrow().created, 0);
    }

    #[test]
    fn initial_population_is_staggered_across_the_ramp() {
        let (backend, _ledger) = backend();
        let config = CubeConfig {
            initial_duration: 3000,
            ..fixed_config(5)
        };
        let mut animator = Animator::new(config, Spawner::with_seed(3));
        animator.mount(backend, 800, 600, Duration::ZERO);

        // five frames spawn five cubes; only the first has no delay
        let mut ids = Vec::new();
        for f in 0..5 {
            ids.push(animator.frame(frame_time(f)).spawned.unwrap());
        }
        let start_y = -300.0 - 100.0;
        assert!(animator.cube(ids[0]).unwrap().position.y > start_y);
        for id in &ids[1..] {
            assert_eq!(animator.cube(*id).unwrap().position.y, start_y);
        }

        // cube k starts at spawn time (16k ms) + 600k ms
        animator.frame(Duration::from_millis(16 + 600 - 1));
        assert_eq!(animator.cube(ids[1]).unwrap().position.y, start_y);
        animator.frame(Duration::from_millis(16 + 600));
        assert_eq!(animator.cube(ids[1]).unwrap().position.y, start_y + 10.0);
        assert_eq!(animator.cube(ids[2]).unwrap().position.y, start_y);
    }

    #[test]
    fn after_ramp_new_cubes_tick_on_spawn_frame() {
        let (backend, _ledger) = backend();
        let config = CubeConfig {
            initial_duration: 100,
            ..fixed_config(2)
        };
        let mut animator = Animator::new(config, Spawner::with_seed(4));
        animator.mount(backend, 800, 600, Duration::ZERO);
        animator.frame(Duration::ZERO);
        assert!(!animator.is_warmed_up());

        // second spawn lands after the window closed: no stagger
        let report = animator.frame(Duration::from_millis(150));
        assert!(animator.is_warmed_up());
        let id = report.spawned.unwrap();
        assert_eq!(animator.cube(id).unwrap().position.y, -400.0 + 10.0);
    }

    #[test]
    fn unmount_releases_every_in_flight_cube() {
        let (backend, ledger) = backend();
        let config = CubeConfig {
            initial_duration: 5000,
            ..fixed_config(6)
        };
        let mut animator = Animator::new(config, Spawner::with_seed(5));
        animator.mount(backend, 800, 600, Duration::ZERO);
        for f in 0..6 {
            animator.frame(frame_time(f));
        }
        assert_eq!(animator.scene_len(), 6);

        assert_eq!(animator.unmount(), 6);
        assert_eq!(animator.scene_len(), 0);
        assert_eq!(animator.live_count(), 0);
        assert!(!animator.is_mounted());
        let ledger = ledger.borrow();
        assert_eq!(ledger.released.len(), 6);
        assert!(ledger.live.is_empty());
        assert_eq!(ledger.shutdowns, 1);
        drop(ledger);

        // second unmount is harmless, frames are no-ops
        assert_eq!(animator.unmount(), 0);
        assert_eq!(animator.frame(frame_time(7)), FrameReport::default());
    }

    #[test]
    fn continuation_after_unmount_is_stale() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(6));
        animator.mount(backend, 300, 200, Duration::ZERO);
        animator.frame(Duration::ZERO);
        let task = animator.pending_tasks()[0];
        assert_eq!(animator.tick_task(task, frame_time(1)), TickOutcome::Alive);

        animator.unmount();
        let renders = ledger.borrow().renders.len();
        assert_eq!(animator.tick_task(task, frame_time(2)), TickOutcome::Stale);

        // still stale after a fresh mount: the epoch moved on
        let (backend, fresh) = self::backend();
        animator.mount(backend, 300, 200, Duration::ZERO);
        assert_eq!(animator.tick_task(task, frame_time(3)), TickOutcome::Stale);
        assert_eq!(ledger.borrow().renders.len(), renders);
        assert!(fresh.borrow().renders.is_empty());
    }

    #[test]
    fn tick_task_renders_and_retires() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(8));
        animator.mount(backend, 300, 200, Duration::ZERO);
        animator.frame(Duration::ZERO);
        let task = animator.pending_tasks()[0];
        let renders_before = ledger.borrow().renders.len();

        let mut outcomes = Vec::new();
        for f in 1.. {
            let outcome = animator.tick_task(task, frame_time(f));
            outcomes.push(outcome);
            if outcome != TickOutcome::Alive {
                break;
            }
        }
        // first frame already ticked once; 40 more reach y = 210
        assert_eq!(outcomes.len(), 40);
        assert_eq!(outcomes.last(), Some(&TickOutcome::Retired));
        assert_eq!(ledger.borrow().renders.len(), renders_before + 40);
        assert_eq!(animator.live_count(), 0);
        assert_eq!(animator.tick_task(task, frame_time(99)), TickOutcome::Stale);
    }

    #[test]
    fn staggered_task_waits_for_its_start_time() {
        let (backend, ledger) = backend();
        let config = CubeConfig {
            initial_duration: 3000,
            ..fixed_config(2)
        };
        let mut animator = Animator::new(config, Spawner::with_seed(15));
        animator.mount(backend, 800, 600, Duration::ZERO);
        animator.frame(frame_time(0));
        let second = animator.frame(frame_time(1)).spawned.unwrap();
        let task = animator
            .pending_tasks()
            .into_iter()
            .find(|t| t.cube == second)
            .unwrap();
        let start_y = animator.cube(second).unwrap().position.y;
        let renders = ledger.borrow().renders.len();

        // spawned at 16ms with index 1: starts at 16 + 1500
        assert_eq!(animator.tick_task(task, frame_time(2)), TickOutcome::Waiting);
        assert_eq!(animator.tick_task(task, Duration::from_millis(1515)), TickOutcome::Waiting);
        assert_eq!(animator.cube(second).unwrap().position.y, start_y);
        assert_eq!(ledger.borrow().renders.len(), renders);

        assert_eq!(animator.tick_task(task, Duration::from_millis(1516)), TickOutcome::Alive);
        assert_eq!(animator.cube(second).unwrap().position.y, start_y + 10.0);
    }

    #[test]
    fn a_cube_ticks_once_per_frame_time() {
        let (backend, _ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(16));
        animator.mount(backend, 800, 600, Duration::ZERO);
        let id = animator.frame(frame_time(0)).spawned.unwrap();
        let task = animator.pending_tasks()[0];
        let y = animator.cube(id).unwrap().position.y;

        // frame() already ticked this cube at t=0
        assert_eq!(animator.tick_task(task, frame_time(0)), TickOutcome::Waiting);
        assert_eq!(animator.cube(id).unwrap().position.y, y);

        assert_eq!(animator.tick_task(task, frame_time(1)), TickOutcome::Alive);
        assert_eq!(animator.frame(frame_time(1)).ticked, 0);
        assert_eq!(animator.cube(id).unwrap().position.y, y + 10.0);
    }

    #[test]
    fn idle_scene_stops_asking_for_frames() {
        let (backend, _ledger) = backend();
        let mut animator = Animator::new(fixed_config(0), Spawner::with_seed(17));
        assert!(!animator.wants_frame(), "nothing mounted");
        animator.mount(backend, 800, 600, Duration::ZERO);
        assert!(animator.wants_frame(), "first frame clears the surface");
        animator.frame(frame_time(0));
        assert!(!animator.wants_frame());

        let more = CubeConfig {
            number_of_cubes: 1,
            ..animator.config().clone()
        };
        animator.reconfigure(more);
        assert!(animator.wants_frame(), "a slot opened");
        animator.frame(frame_time(1));
        assert!(animator.wants_frame(), "a cube is falling");

        animator.resize(0, 0);
        assert!(!animator.wants_frame(), "minimized");
    }

    #[test]
    fn resize_refits_camera_without_moving_cubes() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(7));
        animator.mount(backend, 800, 600, Duration::ZERO);
        let id = animator.frame(Duration::ZERO).spawned.unwrap();
        let before = animator.cube(id).unwrap().position;

        animator.resize(400, 300);
        let b = animator.viewport().unwrap().bounds();
        assert_eq!((b.left, b.right, b.top, b.bottom), (-200.0, 200.0, -150.0, 150.0));
        assert_eq!(animator.cube(id).unwrap().position, before);
        assert_eq!(ledger.borrow().resizes, vec![(400, 300)]);
    }

    #[test]
    fn remount_shuts_down_previous_context() {
        let (first, first_ledger) = backend();
        let mut animator = Animator::new(fixed_config(3), Spawner::with_seed(10));
        animator.mount(first, 800, 600, Duration::ZERO);
        for f in 0..3 {
            animator.frame(frame_time(f));
        }

        let (second, second_ledger) = backend();
        animator.mount(second, 800, 600, frame_time(3));
        assert_eq!(first_ledger.borrow().shutdowns, 1);
        assert!(first_ledger.borrow().live.is_empty());
        assert_eq!(animator.live_count(), 0);

        animator.frame(frame_time(4));
        assert_eq!(second_ledger.borrow().created, 1);
        assert_eq!(first_ledger.borrow().created, 3);
    }

    #[test]
    fn reconfigure_reports_remount_for_context_options() {
        let (backend, _ledger) = backend();
        let mut animator = Animator::new(CubeConfig::default(), Spawner::with_seed(12));
        animator.mount(backend, 800, 600, Duration::ZERO);

        let deeper = CubeConfig {
            max_edge_length: 900.0,
            number_of_cubes: 8,
            ..CubeConfig::default()
        };
        assert_eq!(animator.reconfigure(deeper), Reconfigure::Applied);
        let b = animator.viewport().unwrap().bounds();
        assert_eq!((b.near, b.far), (-900.0, 900.0));
        assert_eq!(b.right, 400.0);
        assert_eq!(animator.config().number_of_cubes, 8);

        let recolored = CubeConfig {
            background_color: Rgb::new(1, 2, 3),
            ..animator.config().clone()
        };
        assert_eq!(animator.reconfigure(recolored), Reconfigure::Remount);
        assert_eq!(animator.config().background_color, Rgb::new(1, 2, 3));
    }

    #[test]
    fn drop_tears_down_a_mounted_scene() {
        let (backend, ledger) = backend();
        {
            let mut animator = Animator::new(fixed_config(2), Spawner::with_seed(13));
            animator.mount(backend, 800, 600, Duration::ZERO);
            animator.frame(frame_time(0));
            animator.frame(frame_time(1));
        }
        let ledger = ledger.borrow();
        assert_eq!(ledger.released.len(), 2);
        assert_eq!(ledger.shutdowns, 1);
    }

    #[test]
    fn zero_size_surface_still_renders_safely() {
        let (backend, ledger) = backend();
        let mut animator = Animator::new(fixed_config(1), Spawner::with_seed(14));
        animator.mount(backend, 0, 0, Duration::ZERO);
        let report = animator.frame(Duration::ZERO);
        assert!(report.rendered);
        assert_eq!(report.ticked, 1);
        assert_eq!(ledger.borrow().renders, vec![1]);
    }
}
