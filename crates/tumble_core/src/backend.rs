use std::fmt::Debug;

use glam::Mat4;

use crate::config::Rgb;

/// One cube to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<H> {
    pub handle: H,
    pub model: Mat4,
}

/// Everything the backend needs for a single render of the full scene.
#[derive(Debug)]
pub struct RenderFrame<'a, H> {
    pub view_proj: Mat4,
    pub clear_color: Rgb,
    pub items: &'a [DrawItem<H>],
}

/// The rendering collaborator: owns the render context and every cube's
/// geometry and material. The engine only creates, draws, resizes and disposes.
pub trait RenderBackend {
    type Handle: Copy + Eq + Debug;

    /// Allocate outline geometry and material for one cube.
    fn create_cube(&mut self, edge_length: f32, edge_color: Rgb) -> Self::Handle;

    /// Release the geometry and material behind `handle`.
    fn release_cube(&mut self, handle: Self::Handle);

    fn render(&mut self, frame: &RenderFrame<'_, Self::Handle>);

    fn resize(&mut self, width: u32, height: u32);

    /// Tear down the render context. Called once, after every cube was released.
    fn shutdown(&mut self);
}
