use bytemuck::{Pod, Zeroable};
use std::mem;

/// Interleaved position + normal, one per triangle corner.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct SurfaceVertex {
    pub pos: [f32; 3],
    pub nor: [f32; 3],
}

impl SurfaceVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3
    ];

    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[inline]
pub fn sv(pos: [f32; 3], nor: [f32; 3]) -> SurfaceVertex {
    SurfaceVertex { pos, nor }
}
