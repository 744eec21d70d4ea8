use glam::Mat4;

use tumble_core::Rgb;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_matrix(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

/// Per-cube transform and outline color, bound at group 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl CubeUniform {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }
}

/// sRGB transfer function inverse, for writing config colors into an sRGB target.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Config color as a shader/clear value. An sRGB surface re-encodes on write,
/// so the channels are linearized first.
pub fn color_for_target(color: Rgb, srgb_target: bool) -> [f32; 4] {
    let [r, g, b] = color.to_unit();
    if srgb_target {
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
    } else {
        [r, g, b, 1.0]
    }
}
