use glam::Mat4;

/// The six extents of the orthographic camera.
///
/// `top` is negative and `bottom` positive: screen-space y grows downwards, so a
/// cube "falls" by increasing its y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    fn fit(width: u32, height: u32, depth: f32) -> Self {
        let half_w = width as f32 * 0.5;
        let half_h = height as f32 * 0.5;
        Self {
            left: -half_w,
            right: half_w,
            top: -half_h,
            bottom: half_h,
            near: -depth,
            far: depth,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.left == self.right || self.top == self.bottom || self.near == self.far
    }
}

/// Tracks the host surface size and keeps the camera bounds fitted to it.
///
/// Every mutation replaces the whole [`OrthoBounds`] value, so a reader never
/// sees a half-updated set.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    width: u32,
    height: u32,
    depth: f32,
    bounds: OrthoBounds,
}

impl ViewportTracker {
    pub fn new(width: u32, height: u32, max_edge_length: f32) -> Self {
        let depth = max_edge_length.abs();
        Self {
            width,
            height,
            depth,
            bounds: OrthoBounds::fit(width, height, depth),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.bounds = OrthoBounds::fit(width, height, self.depth);
    }

    /// Recompute near/far for a new maximum cube size. Width and height are untouched.
    pub fn rescale_depth(&mut self, max_edge_length: f32) {
        self.depth = max_edge_length.abs();
        self.bounds = OrthoBounds {
            near: -self.depth,
            far: self.depth,
            ..self.bounds
        };
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn half_width(&self) -> f32 {
        self.width as f32 * 0.5
    }

    pub fn half_height(&self) -> f32 {
        self.height as f32 * 0.5
    }

    pub fn bounds(&self) -> OrthoBounds {
        self.bounds
    }

    /// Projection matrix for the current bounds. A degenerate camera collapses
    /// everything to the origin, so rendering stays safe and draws nothing.
    pub fn projection(&self) -> Mat4 {
        let b = self.bounds;
        if b.is_degenerate() {
            return Mat4::ZERO;
        }
        Mat4::orthographic_rh(b.left, b.right, b.bottom, b.top, b.near, b.far)
    }
}
