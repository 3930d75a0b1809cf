use graph_field::prelude::*;
use graph_field_examples::{heightmap_to_png, init_tracing};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A hemisphere of radius 5: outside the circle x^2 + y^2 = 25 the square
    // root is undefined, so those samples sentinel out and the triangulation
    // leaves a hole around the rim.
    let config = GraphConfig::new("(25 - x^2 - y^2)^0.5", 2)
        .with_dimension(201)
        .with_output_dir("generated");
    let graph = Graph::try_new(config)?;

    let field = graph.height_field();
    let total = field.grid().sample_count();
    let valid = field.valid_count();
    let full_cells = (field.grid().dimension() - 1).pow(2) * 2;
    info!(
        "Graph 2: {}/{} valid samples ({} holes), {}/{} triangles survive.",
        valid,
        total,
        total - valid,
        graph.mesh().triangle_count(),
        full_cells
    );

    heightmap_to_png(graph.heightmap(), "generated/graph2.png")?;
    Ok(())
}
