use graph_field::prelude::*;
use graph_field_examples::init_tracing;
use tracing::info;

/// A loader-style base mesh: one stride-12 quad standing in for the
/// Wavefront-style model the renderer draws alongside the graphs.
fn base_quad() -> (Vec<f32>, Vec<u32>) {
    let mut vertex_data = Vec::with_capacity(4 * VERTEX_STRIDE_FLOATS);
    for (x, z) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        vertex_data.extend([
            x, 0.0, z, // position
            0.0, 1.0, 0.0, // normal
            0.6, 0.6, 0.6, 1.0, // color
            (x + 1.0) / 2.0,
            (z + 1.0) / 2.0, // texcoord
        ]);
    }
    (vertex_data, vec![0, 1, 2, 0, 2, 3])
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Up to three equations, ids 1..=3, exactly like the interactive frontend.
    let equations = ["sin(x) * cos(y)", "x^2 - y^2", "5 * sin(x * y)"];

    let (mut vertex_data, mut index_data) = base_quad();

    for (i, equation) in equations.iter().enumerate() {
        let id = i as u32 + 1;
        let config = GraphConfig::new(*equation, id)
            .with_dimension(101)
            .with_output_dir("generated");
        let graph = Graph::try_new(config)?;
        graph.mesh().append_to(&mut vertex_data, &mut index_data);
    }

    info!(
        "Combined draw call: {} vertices, {} faces.",
        vertex_data.len() / VERTEX_STRIDE_FLOATS,
        index_data.len() / 3
    );
    Ok(())
}
