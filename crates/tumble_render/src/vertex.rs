use tumble_core::cube::edge_line_list;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: std::mem::offset_of!(LineVertex, position) as wgpu::BufferAddress,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Line-list vertices for the 12 edges of a cube centered at the origin.
pub fn cube_outline(edge_length: f32) -> Vec<LineVertex> {
    edge_line_list(edge_length)
        .iter()
        .map(|v| LineVertex {
            position: v.to_array(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_has_twelve_segments_on_the_cube_surface() {
        let verts = cube_outline(10.0);
        assert_eq!(verts.len(), 24);
        for v in &verts {
            assert!(v.position.iter().all(|c| c.abs() == 5.0));
        }
    }
}
