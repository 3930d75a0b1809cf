use graph_field::prelude::*;
use graph_field_examples::{heightmap_to_png, init_tracing};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A paraboloid bowl; |z| stays within the default clip bound over most of
    // the domain, so the mesh is nearly complete.
    let config = GraphConfig::new("x^2 + y^2", 1)
        .with_dimension(201)
        .with_output_dir("generated");
    let graph = Graph::try_new(config)?;

    let field = graph.height_field();
    info!(
        "Graph 1: {}/{} valid samples, {} triangles.",
        field.valid_count(),
        field.grid().sample_count(),
        graph.mesh().triangle_count()
    );

    heightmap_to_png(graph.heightmap(), "generated/graph1.png")?;
    Ok(())
}
