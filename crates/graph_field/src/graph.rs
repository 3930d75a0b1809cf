//! Graph construction pipeline and ownership.
//!
//! A [`Graph`] is built once from a [`GraphConfig`] and owns everything it
//! produces: the compiled expression, the sampled height field, the written
//! heightmap handle, and the mesh buffers. Construction either fully
//! succeeds or fails with an error before any partial mesh is exposed.
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::field::grid::SampleGrid;
use crate::field::normals::estimate_normals;
use crate::field::sampler::{HeightField, DEFAULT_CLIP_BOUND};
use crate::mesh::builder::GraphMesh;
use crate::mesh::vertex::GraphVertex;
use crate::ppm::{write_heightmap, Heightmap};

/// Default grid resolution per axis.
pub const DEFAULT_DIMENSION: usize = 401;

/// Default output directory for heightmap images.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Configuration for constructing a [`Graph`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct GraphConfig {
    /// Equation text in the form `z = f(x, y)` (right-hand side only).
    pub equation: String,
    /// Grid points per axis; must be at least 2.
    pub dimension: usize,
    /// Graph id, used for file naming and color-channel selection.
    pub id: u32,
    /// Vertical clip bound for |z|.
    pub clip_bound: f32,
    /// Directory the heightmap image is written to.
    pub output_dir: PathBuf,
}

impl GraphConfig {
    /// Creates a configuration with default resolution, clip bound, and output directory.
    pub fn new(equation: impl Into<String>, id: u32) -> Self {
        Self {
            equation: equation.into(),
            dimension: DEFAULT_DIMENSION,
            id,
            clip_bound: DEFAULT_CLIP_BOUND,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Sets the grid resolution per axis.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the vertical clip bound.
    pub fn with_clip_bound(mut self, clip_bound: f32) -> Self {
        self.clip_bound = clip_bound;
        self
    }

    /// Sets the heightmap output directory.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.equation.trim().is_empty() {
            return Err(Error::InvalidConfig("equation must not be empty".into()));
        }
        if self.dimension < 2 {
            return Err(Error::InvalidConfig(format!(
                "dimension must be >= 2 but was {}",
                self.dimension
            )));
        }
        if !self.clip_bound.is_finite() || self.clip_bound <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "clip_bound must be positive and finite but was {}",
                self.clip_bound
            )));
        }
        Ok(())
    }
}

/// A fully constructed graph: height field, heightmap image, and mesh buffers.
///
/// All owned data is immutable after construction and released on drop.
#[derive(Debug)]
pub struct Graph {
    config: GraphConfig,
    expression: Expression,
    field: HeightField,
    heightmap: Heightmap,
    mesh: GraphMesh,
}

impl Graph {
    /// Runs the full pipeline: validate, compile, sample, export, triangulate.
    pub fn try_new(config: GraphConfig) -> Result<Self> {
        config.validate()?;

        let expression = Expression::compile(&config.equation)?;
        let grid = SampleGrid::new(config.dimension)?;

        let field = HeightField::sample(&expression, grid, config.clip_bound);
        let valid = field.valid_count();
        info!(
            "Sampled graph {} ('{}'): {}/{} valid samples.",
            config.id,
            expression.source(),
            valid,
            grid.sample_count()
        );
        if valid == 0 {
            warn!(
                "Graph {} has no valid samples; the mesh will be empty.",
                config.id
            );
        }

        let heightmap = write_heightmap(&field, expression.source(), &config.output_dir, config.id)?;

        let normals = estimate_normals(&field);
        let colors = field.colors(config.id);
        let mesh = GraphMesh::build(&field, &normals, &colors);
        info!(
            "Built graph {}: {} vertices, {} triangles, heightmap '{}'.",
            config.id,
            mesh.vertices().len(),
            mesh.triangle_count(),
            heightmap.path().display()
        );

        Ok(Self {
            config,
            expression,
            field,
            heightmap,
            mesh,
        })
    }

    /// The configuration this graph was built from.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The compiled equation.
    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// The sampled height field.
    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    /// The written heightmap image handle.
    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    /// The triangulated mesh buffers.
    pub fn mesh(&self) -> &GraphMesh {
        &self.mesh
    }

    /// Interleaved vertices, one per grid sample.
    pub fn vertices(&self) -> &[GraphVertex] {
        self.mesh.vertices()
    }

    /// Zero-copy float view of the vertex buffer.
    pub fn vertex_data(&self) -> &[f32] {
        self.mesh.vertex_data()
    }

    /// Triangle indices.
    pub fn indices(&self) -> &[u32] {
        self.mesh.indices()
    }
}
