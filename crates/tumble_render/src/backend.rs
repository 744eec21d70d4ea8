//! wgpu implementation of [`RenderBackend`].

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use tumble_core::{RenderBackend, RenderFrame, Rgb};

use crate::camera::{color_for_target, CameraUniform, CubeUniform};
use crate::error::RenderError;
use crate::gpu_context::GpuContext;
use crate::line_pipeline::LinePipeline;
use crate::vertex::cube_outline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeHandle(u64);

struct GpuCube {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 4],
}

impl GpuCube {
    fn destroy(self) {
        self.vertex_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

struct GpuState {
    ctx: GpuContext,
    pipeline: LinePipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

pub struct WgpuBackend {
    gpu: Option<GpuState>,
    cubes: HashMap<CubeHandle, GpuCube>,
    next_handle: u64,
}

impl WgpuBackend {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let ctx = GpuContext::new(window)?;
        let pipeline = LinePipeline::new(&ctx.device, ctx.surface_format);

        let camera_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::bytes_of(&CameraUniform::from_matrix(glam::Mat4::ZERO)),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipeline.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        log::info!(
            "Render context ready ({}x{}, {:?})",
            ctx.size.0,
            ctx.size.1,
            ctx.surface_format
        );
        Ok(Self {
            gpu: Some(GpuState {
                ctx,
                pipeline,
                camera_buffer,
                camera_bind_group,
            }),
            cubes: HashMap::new(),
            next_handle: 0,
        })
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }
}

impl RenderBackend for WgpuBackend {
    type Handle = CubeHandle;

    fn create_cube(&mut self, edge_length: f32, edge_color: Rgb) -> CubeHandle {
        let handle = CubeHandle(self.next_handle);
        self.next_handle += 1;

        let Some(gpu) = self.gpu.as_ref() else {
            log::warn!("create_cube after shutdown; cube will not be drawn");
            return handle;
        };
        let device = &gpu.ctx.device;

        let vertices = cube_outline(edge_length);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Outline Vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let color = color_for_target(edge_color, gpu.ctx.surface_format.is_srgb());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Uniform Buffer"),
            contents: bytemuck::bytes_of(&CubeUniform::new(glam::Mat4::IDENTITY, color)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Bind Group"),
            layout: &gpu.pipeline.cube_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.cubes.insert(
            handle,
            GpuCube {
                vertex_buffer,
                vertex_count: vertices.len() as u32,
                uniform_buffer,
                bind_group,
                color,
            },
        );
        handle
    }

    fn release_cube(&mut self, handle: CubeHandle) {
        match self.cubes.remove(&handle) {
            Some(cube) => cube.destroy(),
            None => log::trace!("release_cube({:?}): no GPU resources", handle),
        }
    }

    fn render(&mut self, frame: &RenderFrame<'_, CubeHandle>) {
        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        if !gpu.ctx.is_drawable() {
            return;
        }

        gpu.ctx.queue.write_buffer(
            &gpu.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform::from_matrix(frame.view_proj)),
        );
        for item in frame.items {
            if let Some(cube) = self.cubes.get(&item.handle) {
                gpu.ctx.queue.write_buffer(
                    &cube.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&CubeUniform::new(item.model, cube.color)),
                );
            }
        }

        let Some((output, view)) = gpu.ctx.begin_frame() else {
            return;
        };

        let [r, g, b, _] = color_for_target(frame.clear_color, gpu.ctx.surface_format.is_srgb());
        let mut encoder = gpu
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&gpu.pipeline.pipeline);
            pass.set_bind_group(0, &gpu.camera_bind_group, &[]);
            for item in frame.items {
                let Some(cube) = self.cubes.get(&item.handle) else {
                    continue;
                };
                pass.set_bind_group(1, &cube.bind_group, &[]);
                pass.set_vertex_buffer(0, cube.vertex_buffer.slice(..));
                pass.draw(0..cube.vertex_count, 0..1);
            }
        }

        gpu.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.ctx.resize(width, height);
        }
    }

    fn shutdown(&mut self) {
        if !self.cubes.is_empty() {
            log::warn!(
                "Shutting down with {} cube resources still allocated",
                self.cubes.len()
            );
            for (_, cube) in self.cubes.drain() {
                cube.destroy();
            }
        }
        if self.gpu.take().is_some() {
            log::info!("Render context released");
        }
    }
}
