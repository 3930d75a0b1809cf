//! Interleaved vertex record shared with the base-mesh collaborator.
//!
//! The 12-float stride (position, normal, color, texcoord) is the fixed
//! contract with the external renderer and the Wavefront-style loader: both
//! sides use the same layout so buffers can be concatenated and index-offset
//! into a single draw call.
use bytemuck::{Pod, Zeroable};

/// Floats per vertex in the interleaved buffer.
pub const VERTEX_STRIDE_FLOATS: usize = 12;

/// One interleaved vertex: position, normal, RGBA color, texture coordinate.
///
/// Generated graphs always carry the placeholder texcoord `(0, 0)`; the
/// heightmap texture is sampled by position in the collaborator's shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GraphVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
    pub texcoord: [f32; 2],
}
