//! Tumble: wireframe cubes falling through a window.
//!
//! winit drives the loop via `ApplicationHandler`. Every `RedrawRequested` is one
//! displayed frame and runs exactly one `Animator::frame`, which spawns, ticks,
//! renders and retires. `about_to_wait` asks for the next redraw, polling while
//! the scene is animating and waking only a few times a second when it is idle.
//!
//! The config file named on the command line (default `assets/tumble.json`) is
//! polled by mtime at frame boundaries and re-applied when it changes.

mod input;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use input::{InputState, Key};
use settings::{load_config_from_path, ConfigWatcher};
use tumble_core::{Animator, CubeConfig, FrameClock, Reconfigure, Spawner};
use tumble_render::{RenderError, WgpuBackend};

const FPS_LOG_INTERVAL: u64 = 600;
/// Wake-up period while nothing animates; keeps hot reload and keys responsive.
const IDLE_WAKE_INTERVAL: Duration = Duration::from_millis(200);

/// All mutable engine state. Built lazily in `ApplicationHandler::resumed`
/// because a window (and so a surface) only exists from then on.
struct EngineState {
    window: Arc<Window>,
    animator: Animator<WgpuBackend>,
    clock: FrameClock,
    input: InputState,
    watcher: ConfigWatcher,
}

impl EngineState {
    fn new(
        window: Arc<Window>,
        config: CubeConfig,
        watcher: ConfigWatcher,
    ) -> Result<Self, RenderError> {
        let clock = FrameClock::new();
        let mut animator = Animator::new(config, Spawner::from_entropy());
        let backend = WgpuBackend::new(window.clone())?;
        let size = window.inner_size();
        animator.mount(backend, size.width, size.height, clock.elapsed());

        Ok(Self {
            window,
            animator,
            clock,
            input: InputState::new(),
            watcher,
        })
    }

    /// Tear the render context down and build a fresh one on the same window.
    fn remount(&mut self) -> Result<(), RenderError> {
        self.animator.unmount();
        let backend = WgpuBackend::new(self.window.clone())?;
        let size = self.window.inner_size();
        self.animator
            .mount(backend, size.width, size.height, self.clock.elapsed());
        Ok(())
    }

    fn apply_config(&mut self, config: CubeConfig) -> Result<(), RenderError> {
        if config.style != self.animator.config().style {
            self.apply_style(&config);
        }
        match self.animator.reconfigure(config) {
            Reconfigure::Applied => Ok(()),
            Reconfigure::Remount => {
                log::info!("Background color or ramp window changed; remounting");
                self.remount()
            }
        }
    }

    fn apply_style(&self, config: &CubeConfig) {
        let Some(style) = &config.style else {
            return;
        };
        if let Some(title) = &style.title {
            self.window.set_title(title);
        }
        let target = settings::platform_config(config);
        if style.width.is_some() || style.height.is_some() {
            let _ = self
                .window
                .request_inner_size(winit::dpi::LogicalSize::new(target.width, target.height));
        }
    }

    fn reload_config(&mut self, reason: &str) -> Result<(), RenderError> {
        match load_config_from_path(self.watcher.path()) {
            Ok(config) => {
                log::info!("Config reloaded ({reason})");
                self.apply_config(config)
            }
            Err(e) => {
                log::error!("Config reload failed ({reason}), keeping previous settings: {e}");
                Ok(())
            }
        }
    }

    fn step_cube_count(&mut self, delta: i32) {
        let current = self.animator.config().number_of_cubes;
        let next = settings::step_cube_count(current, delta);
        if next == current {
            return;
        }
        let config = CubeConfig {
            number_of_cubes: next,
            ..self.animator.config().clone()
        };
        self.animator.reconfigure(config);
        log::info!("numberOfCubes: {current} -> {next}");
    }
}

struct App {
    config_path: PathBuf,
    state: Option<EngineState>,
}

impl App {
    fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            state: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.animator.unmount();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let config = settings::load_or_default(&self.config_path);
        let platform = settings::platform_config(&config);
        let window = match tumble_platform::create_window(event_loop, &platform) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        log::info!("Window created: {}x{}", platform.width, platform.height);

        let watcher = ConfigWatcher::new(self.config_path.clone());
        match EngineState::new(window, config, watcher) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to initialise rendering: {e}");
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        // idle wake-up: run one frame for hot reload and pending key presses
        if let (StartCause::ResumeTimeReached { .. }, Some(state)) = (cause, &self.state) {
            state.window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            let animating = state.animator.wants_frame();
            event_loop.set_control_flow(control_flow_for(animating, Instant::now()));
            if animating {
                state.window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                state
                    .animator
                    .resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = state.clock.begin_frame();

                if state.input.is_just_pressed(Key::Escape) {
                    log::info!("Escape pressed, exiting.");
                    self.shutdown(event_loop);
                    return;
                }
                if state.input.is_just_pressed(Key::Up) {
                    state.step_cube_count(1);
                }
                if state.input.is_just_pressed(Key::Down) {
                    state.step_cube_count(-1);
                }

                let forced = state.input.is_just_pressed(Key::R);
                if state.watcher.should_reload() || forced {
                    let reason = if forced { "forced" } else { "file changed" };
                    if let Err(e) = state.reload_config(reason) {
                        log::error!("Failed to rebuild render context: {e}");
                        self.shutdown(event_loop);
                        return;
                    }
                }

                state.animator.frame(now);
                state.input.end_frame();

                if state.clock.frame_count % FPS_LOG_INTERVAL == 0 {
                    log::debug!(
                        "{:.1} fps ({:.2}ms), {} live cubes",
                        state.clock.smoothed_fps,
                        state.clock.smoothed_frame_time_ms,
                        state.animator.live_count()
                    );
                }
            }

            _ => {}
        }
    }
}

fn control_flow_for(animating: bool, now: Instant) -> ControlFlow {
    if animating {
        ControlFlow::Poll
    } else {
        ControlFlow::WaitUntil(now + IDLE_WAKE_INTERVAL)
    }
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::KeyR => Some(Key::R),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Tumble starting...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_CONFIG_PATH));

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {e}");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config_path);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_scene_waits_instead_of_polling() {
        let now = Instant::now();
        assert_eq!(control_flow_for(true, now), ControlFlow::Poll);
        assert_eq!(
            control_flow_for(false, now),
            ControlFlow::WaitUntil(now + IDLE_WAKE_INTERVAL)
        );
    }

    #[test]
    fn only_control_keys_are_mapped() {
        assert_eq!(map_key(KeyCode::ArrowUp), Some(Key::Up));
        assert_eq!(map_key(KeyCode::KeyR), Some(Key::R));
        assert_eq!(map_key(KeyCode::Space), None);
    }
}
