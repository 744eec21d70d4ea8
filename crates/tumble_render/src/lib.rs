pub mod backend;
pub mod camera;
pub mod error;
pub mod gpu_context;
pub mod line_pipeline;
pub mod vertex;

pub use backend::{CubeHandle, WgpuBackend};
pub use camera::{CameraUniform, CubeUniform};
pub use error::RenderError;
pub use gpu_context::GpuContext;
pub use line_pipeline::LinePipeline;
pub use vertex::LineVertex;
