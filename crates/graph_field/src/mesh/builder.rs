//! Triangulation of a sampled height field into renderable buffers.
//!
//! Every grid sample becomes one vertex, valid or not, so indices stay a pure
//! function of grid position. Triangles are only emitted for cells whose
//! corners are all valid, which leaves holes where the function is undefined
//! or out of bound instead of interpolating across invalid regions.
use glam::Vec3;

use crate::field::sampler::HeightField;
use crate::mesh::vertex::{GraphVertex, VERTEX_STRIDE_FLOATS};

/// An immutable vertex/index buffer pair for one graph.
#[derive(Clone, Debug, Default)]
pub struct GraphMesh {
    vertices: Vec<GraphVertex>,
    indices: Vec<u32>,
}

impl GraphMesh {
    /// Builds the interleaved vertex buffer and triangle index buffer.
    ///
    /// `normals` and `colors` must hold one entry per grid sample, in grid
    /// iteration order.
    pub fn build(field: &HeightField, normals: &[Vec3], colors: &[[f32; 4]]) -> Self {
        let grid = field.grid();
        let dimension = grid.dimension();
        assert_eq!(normals.len(), grid.sample_count(), "one normal per sample");
        assert_eq!(colors.len(), grid.sample_count(), "one color per sample");

        let mut vertices = Vec::with_capacity(grid.sample_count());
        for row in 0..dimension {
            for col in 0..dimension {
                let p = grid.position(col, row);
                let i = grid.index(col, row);
                vertices.push(GraphVertex {
                    position: [p.x, field.reconstruct(field.height(col, row)), p.y],
                    normal: normals[i].to_array(),
                    color: colors[i],
                    texcoord: [0.0, 0.0],
                });
            }
        }

        let heights = field.heights();
        let mut indices = Vec::new();
        for row in 0..dimension - 1 {
            for col in 0..dimension - 1 {
                let curr = grid.index(col, row);
                let right = curr + 1;
                let above = curr + dimension;
                let diagonal = above + 1;

                if heights[curr] >= 0.0 && heights[right] >= 0.0 && heights[above] >= 0.0 {
                    indices.extend([curr as u32, right as u32, above as u32]);
                }
                if heights[diagonal] >= 0.0 && heights[right] >= 0.0 && heights[above] >= 0.0 {
                    indices.extend([right as u32, diagonal as u32, above as u32]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Interleaved vertices, one per grid sample.
    pub fn vertices(&self) -> &[GraphVertex] {
        &self.vertices
    }

    /// Triangle indices, three per face.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of emitted triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Zero-copy view of the vertex buffer as stride-12 floats.
    pub fn vertex_data(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Appends this mesh to a combined buffer pair, rebasing indices by the
    /// vertex count already present.
    ///
    /// This is the concatenation contract with the base-mesh loader: both
    /// sides use the same 12-float stride, so the rebase offset is simply the
    /// current float length divided by the stride.
    pub fn append_to(&self, vertex_data: &mut Vec<f32>, index_data: &mut Vec<u32>) {
        let base = (vertex_data.len() / VERTEX_STRIDE_FLOATS) as u32;
        vertex_data.extend_from_slice(self.vertex_data());
        index_data.extend(self.indices.iter().map(|i| i + base));
    }
}
