//! Shared helpers for the example binaries.
use std::path::Path;

use anyhow::Context;
use graph_field::prelude::Heightmap;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initializes a compact tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Converts a written heightmap to a PNG for quick inspection.
pub fn heightmap_to_png(heightmap: &Heightmap, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let image = image::GrayImage::from_raw(
        heightmap.width() as u32,
        heightmap.height() as u32,
        heightmap.pixels().to_vec(),
    )
    .context("heightmap pixel buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("saving '{}'", path.display()))?;
    info!("Rendered heightmap PNG '{}'.", path.display());
    Ok(())
}
