pub mod backend;
pub mod config;
pub mod cube;
pub mod driver;
pub mod ramp;
pub mod scheduler;
pub mod spawner;
pub mod stage;
pub mod time;
pub mod viewport;

pub use backend::{DrawItem, RenderBackend, RenderFrame};
pub use config::{parse_config, CubeConfig, Rgb, WindowStyle};
pub use cube::{Cube, CubeId};
pub use driver::TickOutcome;
pub use scheduler::TaskHandle;
pub use spawner::Spawner;
pub use stage::{Animator, FrameReport, Reconfigure};
pub use time::FrameClock;
pub use viewport::{OrthoBounds, ViewportTracker};
