//! Helpers that turn CPU-side geometry and uniforms into GPU buffers.

use wgpu::util::DeviceExt;

use crate::{camera::CameraUniform, data_structures::vertex::ColorVertex};

/// An immutable indexed triangle mesh living on the GPU.
#[derive(Debug)]
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, label: &str, vertices: &[ColorVertex], indices: &[u32]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
        }
    }
}

/// A small vertex buffer rewritten every frame (tracer, crosshair).
#[derive(Debug)]
pub struct LineBuffer {
    pub buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl LineBuffer {
    pub fn new(device: &wgpu::Device, label: &str, vertex_count: u32) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (std::mem::size_of::<ColorVertex>() * vertex_count as usize) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            vertex_count,
        }
    }

    pub fn write(&self, queue: &wgpu::Queue, vertices: &[ColorVertex]) {
        if vertices.len() != self.vertex_count as usize {
            log::warn!(
                "line buffer expects {} vertices, got {}",
                self.vertex_count,
                vertices.len()
            );
            return;
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
    }
}

/// One uniform block (`uView`, `uProjection`, `uColor`) and its bind group.
///
/// Each draw of a frame owns a slot, because buffer writes land before the
/// render pass runs and a shared block would only ever hold the last value.
#[derive(Debug)]
pub struct UniformSlot {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[CameraUniform::screen_space([1.0; 3])]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self { buffer, bind_group }
    }

    pub fn write(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[*uniform]));
    }
}

pub fn uniform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("frame_uniform_bind_group_layout"),
    })
}
