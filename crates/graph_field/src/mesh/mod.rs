//! Mesh subsystem: interleaved vertex records and triangulation.
pub mod builder;
pub mod vertex;

pub use builder::GraphMesh;
pub use vertex::{GraphVertex, VERTEX_STRIDE_FLOATS};
