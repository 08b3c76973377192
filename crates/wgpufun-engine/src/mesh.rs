//! CPU-side colored triangle meshes.
//!
//! A `MeshBuilder` is plain data: game code fills one per simulation tick and
//! hands it to `render::MeshRenderer`, which owns the GPU buffers.

use bytemuck::{Pod, Zeroable};

/// A colored 2D vertex in world units.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x3  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Accumulates vertices and u16 triangle-list indices from several shapes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl MeshBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a shape. `indices` are local to `vertices` and get offset by
    /// the number of vertices already in the builder.
    pub fn push(
        &mut self,
        vertices: impl IntoIterator<Item = Vertex>,
        indices: impl IntoIterator<Item = u16>,
    ) {
        let base = self.vertices.len() as u16;
        self.indices.extend(indices.into_iter().map(|i| base + i));
        self.vertices.extend(vertices);
    }

    /// Clears geometry. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(color: [f32; 3]) -> [Vertex; 4] {
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(|position| Vertex { position, color })
    }

    #[test]
    fn push_offsets_indices_by_existing_vertices() {
        let mut mesh = MeshBuilder::new();
        mesh.push(quad([1.0, 0.0, 0.0]), [0, 1, 2, 0, 2, 3]);
        mesh.push(quad([0.0, 1.0, 0.0]), [0, 1, 2, 0, 2, 3]);

        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(mesh.index_count(), 12);
    }

    #[test]
    fn clear_empties_builder() {
        let mut mesh = MeshBuilder::new();
        assert!(mesh.is_empty());
        mesh.push(quad([1.0; 3]), [0, 1, 2]);
        assert!(!mesh.is_empty());
        mesh.clear();
        assert!(mesh.is_empty());
        assert!(mesh.vertices().is_empty());
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
        assert_eq!(Vertex::layout().array_stride, 20);
    }
}
