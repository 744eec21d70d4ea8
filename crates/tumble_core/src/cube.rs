use glam::{EulerRot, Mat4, Vec2, Vec3};

use crate::spawner::CubeParams;

/// Scene-graph key for a cube. Never reused within one [`crate::stage::Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(pub u64);

/// One falling, spinning cube. `H` is the backend handle owning its
/// geometry and material.
#[derive(Debug, Clone)]
pub struct Cube<H> {
    pub id: CubeId,
    pub handle: H,
    pub edge_length: f32,
    pub position: Vec2,
    /// Accumulated radians; deliberately not wrapped.
    pub rotation: Vec2,
    pub speed_y: f32,
    pub rotation_speed: Vec2,
}

impl<H> Cube<H> {
    pub fn new(id: CubeId, handle: H, params: &CubeParams) -> Self {
        Self {
            id,
            handle,
            edge_length: params.edge_length,
            position: params.position,
            rotation: params.rotation,
            speed_y: params.speed_y,
            rotation_speed: params.rotation_speed,
        }
    }

    /// Apply one frame of motion.
    pub fn advance(&mut self) {
        self.position.y += self.speed_y;
        self.rotation += self.rotation_speed;
    }

    /// True once the cube has dropped below the bottom of a viewport of the given
    /// pixel height. The raw height is the threshold, not the half-height.
    pub fn has_exited(&self, viewport_height: u32) -> bool {
        self.position.y > viewport_height as f32
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position.extend(0.0))
            * Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0)
    }
}

/// Corner pairs of the 12 cube edges, indexing [`cube_corners`].
const EDGE_INDICES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

fn cube_corners(edge_length: f32) -> [Vec3; 8] {
    let h = edge_length * 0.5;
    [
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ]
}

/// Outline of a centered cube as a line list: 12 segments, 24 vertices.
pub fn edge_line_list(edge_length: f32) -> [Vec3; 24] {
    let corners = cube_corners(edge_length);
    let mut out = [Vec3::ZERO; 24];
    for (i, &(a, b)) in EDGE_INDICES.iter().enumerate() {
        out[i * 2] = corners[a];
        out[i * 2 + 1] = corners[b];
    }
    out
}
