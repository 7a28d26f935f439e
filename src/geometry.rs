use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Attribute 0: three floats, tightly packed.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };

    const fn new(x: f32, y: f32) -> Self {
        Self {
            position: [x, y, 0.0],
        }
    }
}

/// Two triangles covering the whole of normalized device space.
pub const RECTANGLE: [Vertex; 6] = [
    Vertex::new(-1.0, -1.0),
    Vertex::new(1.0, -1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(1.0, 1.0),
    Vertex::new(-1.0, 1.0),
    Vertex::new(-1.0, -1.0),
];
