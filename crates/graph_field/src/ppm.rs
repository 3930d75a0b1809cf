//! Minimal ASCII PPM export of the raw height array.
//!
//! One `P3` image per graph instance, written to the configured output
//! directory as `graph<id>.ppm`: grayscale, one triple of identical values
//! per pixel, row-major in grid iteration order. The texturing collaborator
//! loads the file back as the graph's diffuse texture.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::field::sampler::HeightField;

/// A written heightmap image, owned by its graph for the graph's lifetime.
///
/// Holds the output path and the written pixel bytes so collaborators can
/// sample the image without re-reading the file.
#[derive(Clone, Debug)]
pub struct Heightmap {
    path: PathBuf,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Heightmap {
    /// Path of the written image file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grayscale pixel bytes, row-major in grid iteration order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Samples the image at normalized coordinates, nearest-pixel, as [0, 1] intensity.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let col = (u.clamp(0.0, 1.0) * (self.width - 1) as f32).round() as usize;
        let row = (v.clamp(0.0, 1.0) * (self.height - 1) as f32).round() as usize;
        f32::from(self.pixels[row * self.width + col]) / 255.0
    }
}

/// Serializes the height array as `<output_dir>/graph<id>.ppm`.
///
/// Heights are clamped to [0, 1] before scaling, so sentineled samples write
/// as black rather than a negative value. The output directory is created if
/// missing; write failures surface as [`crate::error::Error::Io`].
pub fn write_heightmap(
    field: &HeightField,
    equation: &str,
    output_dir: &Path,
    id: u32,
) -> Result<Heightmap> {
    let dimension = field.grid().dimension();

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("graph{}.ppm", id));

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "# Generated .ppm file from equation z = {}", equation)?;
    writeln!(writer, "{} {}", dimension, dimension)?;
    writeln!(writer, "255")?;

    let mut pixels = Vec::with_capacity(field.heights().len());
    for height in field.heights() {
        let value = (height.clamp(0.0, 1.0) * 255.0).round() as u8;
        writeln!(writer, "{} {} {}", value, value, value)?;
        pixels.push(value);
    }
    writer.flush()?;

    debug!("Wrote heightmap '{}'.", path.display());

    Ok(Heightmap {
        path,
        width: dimension,
        height: dimension,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::grid::SampleGrid;
    use crate::field::sampler::{DEFAULT_CLIP_BOUND, SENTINEL_HEIGHT};

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("graph_field_{}_{}", tag, std::process::id()))
    }

    fn field_with_heights(dimension: usize, heights: Vec<f32>) -> HeightField {
        let grid = SampleGrid::new(dimension).expect("valid grid");
        HeightField::from_heights(grid, DEFAULT_CLIP_BOUND, heights).expect("matching length")
    }

    #[test]
    fn pixels_scale_heights_to_bytes() {
        let field = field_with_heights(
            3,
            vec![0.0, 0.5, 1.0, 0.25, 0.75, 1.0, SENTINEL_HEIGHT, 0.5, 0.0],
        );
        let dir = temp_dir("scale");
        let heightmap = write_heightmap(&field, "0", &dir, 1).expect("write succeeds");

        assert_eq!(&heightmap.pixels()[..3], &[0, 128, 255]);
        // The sentinel clamps to black instead of wrapping negative.
        assert_eq!(heightmap.pixels()[6], 0);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn written_file_is_ascii_p3() {
        let field = field_with_heights(2, vec![0.0, 0.5, 1.0, 0.5]);
        let dir = temp_dir("ascii");
        let heightmap = write_heightmap(&field, "x * y", &dir, 3).expect("write succeeds");

        assert!(heightmap.path().ends_with("graph3.ppm"));
        let text = std::fs::read_to_string(heightmap.path()).expect("readable file");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(
            lines.next(),
            Some("# Generated .ppm file from equation z = x * y")
        );
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.next(), Some("0 0 0"));
        assert_eq!(lines.next(), Some("128 128 128"));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn missing_output_directory_is_created() {
        let dir = temp_dir("nested").join("deeper");
        let field = field_with_heights(2, vec![0.5; 4]);
        let heightmap = write_heightmap(&field, "0", &dir, 2).expect("write succeeds");
        assert!(heightmap.path().exists());

        std::fs::remove_dir_all(dir.parent().expect("parent")).expect("cleanup");
    }

    #[test]
    fn unwritable_path_surfaces_io_error() {
        // A file used as the output directory makes create_dir_all fail.
        let blocker = temp_dir("blocked");
        std::fs::write(&blocker, b"occupied").expect("blocker file");

        let field = field_with_heights(2, vec![0.5; 4]);
        let err = write_heightmap(&field, "0", &blocker, 1).expect_err("expected io failure");
        assert!(matches!(err, crate::error::Error::Io(_)));

        std::fs::remove_file(&blocker).expect("cleanup");
    }

    #[test]
    fn sampling_maps_normalized_coordinates() {
        let field = field_with_heights(2, vec![0.0, 1.0, 0.0, 1.0]);
        let dir = temp_dir("sampling");
        let heightmap = write_heightmap(&field, "0", &dir, 4).expect("write succeeds");

        assert_eq!(heightmap.sample(0.0, 0.0), 0.0);
        assert_eq!(heightmap.sample(1.0, 0.0), 1.0);
        assert_eq!(heightmap.sample(1.0, 1.0), 1.0);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
