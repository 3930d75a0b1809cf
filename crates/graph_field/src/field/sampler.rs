//! Height-field sampling, validity classification, and per-sample color.
//!
//! Each grid point is evaluated through the compiled expression and the raw
//! value is normalized into [0, 1] against the vertical clip bound. Samples
//! that evaluate to NaN or fall outside the bound are stored as the sentinel
//! and stay excluded from triangulation, but keep their buffer slot so grid
//! indexing stays dense.
use crate::error::{Error, Result};
use crate::expr::Expression;
use crate::field::grid::SampleGrid;

/// Reserved height marking an undefined or out-of-bound sample.
pub const SENTINEL_HEIGHT: f32 = -1.0;

/// Default vertical clip bound for |z|.
pub const DEFAULT_CLIP_BOUND: f32 = 50.0;

/// A sampled height field over a [`SampleGrid`].
///
/// Heights are normalized into [0, 1], or [`SENTINEL_HEIGHT`] for invalid
/// samples. The array is immutable after construction.
#[derive(Clone, Debug)]
pub struct HeightField {
    grid: SampleGrid,
    clip_bound: f32,
    heights: Vec<f32>,
}

impl HeightField {
    /// Samples the expression over every grid point.
    pub fn sample(expression: &Expression, grid: SampleGrid, clip_bound: f32) -> Self {
        let dimension = grid.dimension();
        let mut heights = Vec::with_capacity(grid.sample_count());

        for row in 0..dimension {
            for col in 0..dimension {
                let p = grid.position(col, row);
                let z = expression.eval(p.x, p.y);
                heights.push(classify(z, clip_bound));
            }
        }

        Self {
            grid,
            clip_bound,
            heights,
        }
    }

    /// Wraps caller-supplied normalized heights, e.g. external elevation data.
    ///
    /// Values are expected to be in [0, 1] or [`SENTINEL_HEIGHT`]; the length
    /// must match the grid's sample count.
    pub fn from_heights(grid: SampleGrid, clip_bound: f32, heights: Vec<f32>) -> Result<Self> {
        if heights.len() != grid.sample_count() {
            return Err(Error::InvalidConfig(format!(
                "expected {} heights for dimension {} but got {}",
                grid.sample_count(),
                grid.dimension(),
                heights.len()
            )));
        }
        Ok(Self {
            grid,
            clip_bound,
            heights,
        })
    }

    /// The grid this field was sampled over.
    pub fn grid(&self) -> SampleGrid {
        self.grid
    }

    /// The vertical clip bound used for normalization.
    pub fn clip_bound(&self) -> f32 {
        self.clip_bound
    }

    /// Normalized heights in grid iteration order.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Normalized height of the sample at `(col, row)`.
    pub fn height(&self, col: usize, row: usize) -> f32 {
        self.heights[self.grid.index(col, row)]
    }

    /// Whether the sample at `(col, row)` is valid (not sentineled).
    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        self.height(col, row) >= 0.0
    }

    /// Number of valid samples.
    pub fn valid_count(&self) -> usize {
        self.heights.iter().filter(|h| **h >= 0.0).count()
    }

    /// Maps a raw value into the normalized [0, 1] range.
    pub fn normalize(&self, z: f32) -> f32 {
        (z + self.clip_bound) / (2.0 * self.clip_bound)
    }

    /// Reconstructs the vertical render position from a normalized height.
    ///
    /// Identity (up to clamping) for in-range heights; the sentinel collapses
    /// to the lower bound.
    pub fn reconstruct(&self, height: f32) -> f32 {
        (height * 2.0 * self.clip_bound - self.clip_bound).clamp(-self.clip_bound, self.clip_bound)
    }

    /// RGBA colors for every sample, tinted by graph id.
    pub fn colors(&self, id: u32) -> Vec<[f32; 4]> {
        self.heights.iter().map(|h| sample_color(*h, id)).collect()
    }
}

fn classify(z: f32, clip_bound: f32) -> f32 {
    if z.is_nan() || z.abs() > clip_bound {
        SENTINEL_HEIGHT
    } else {
        (z + clip_bound) / (2.0 * clip_bound)
    }
}

/// RGBA color for one normalized height.
///
/// A single channel is selected by graph id (1 → blue, 2 → green, otherwise
/// red) and fades with `tint = clamp(height·8 − 3.8, 0, 1)`; invalid samples
/// get zero alpha so holes fade out instead of rendering opaque.
pub fn sample_color(height: f32, id: u32) -> [f32; 4] {
    let tint = (height * 8.0 - 3.8).clamp(0.0, 1.0);
    let value = 1.0 - tint;

    let validity = if height >= 0.0 { 1.0f32 } else { 0.0 };
    let alpha = (validity - 0.1).clamp(0.0, 1.0);

    match id {
        1 => [0.0, 0.0, value, alpha],
        2 => [0.0, value, 0.0, alpha],
        _ => [value, 0.0, 0.0, alpha],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-4, "{a} != {b}");
    }

    fn field_for(source: &str, dimension: usize) -> HeightField {
        let expression = Expression::compile(source).expect("compile succeeds");
        let grid = SampleGrid::new(dimension).expect("valid grid");
        HeightField::sample(&expression, grid, DEFAULT_CLIP_BOUND)
    }

    #[test]
    fn constant_zero_normalizes_to_half() {
        let field = field_for("0", 5);
        assert_eq!(field.heights().len(), 25);
        assert!(field.heights().iter().all(|h| *h == 0.5));
        assert_eq!(field.valid_count(), 25);
    }

    #[test]
    fn nan_samples_are_sentineled() {
        let field = field_for("log(0 - 1)", 4);
        assert!(field.heights().iter().all(|h| *h == SENTINEL_HEIGHT));
        assert_eq!(field.valid_count(), 0);
    }

    #[test]
    fn out_of_bound_samples_are_sentineled() {
        // x^4 leaves the clip range toward the domain edges but not near 0.
        let field = field_for("x^4", 5);
        assert!(!field.is_valid(0, 0));
        assert!(field.is_valid(2, 2));
    }

    #[test]
    fn normalize_reconstruct_round_trips() {
        let field = field_for("0", 3);
        for z in [-50.0f32, -12.25, 0.0, 0.5, 31.75, 50.0] {
            approx_eq(field.reconstruct(field.normalize(z)), z);
        }
    }

    #[test]
    fn sentinel_reconstructs_to_lower_bound() {
        let field = field_for("0", 3);
        assert_eq!(field.reconstruct(SENTINEL_HEIGHT), -DEFAULT_CLIP_BOUND);
    }

    #[test]
    fn from_heights_validates_length() {
        let grid = SampleGrid::new(3).expect("valid grid");
        let err = HeightField::from_heights(grid, DEFAULT_CLIP_BOUND, vec![0.5; 4])
            .expect_err("length mismatch should fail");
        assert!(matches!(err, Error::InvalidConfig(_)));

        let field = HeightField::from_heights(grid, DEFAULT_CLIP_BOUND, vec![0.5; 9])
            .expect("matching length succeeds");
        assert_eq!(field.valid_count(), 9);
    }

    #[test]
    fn color_channel_follows_graph_id() {
        let cold = sample_color(0.5, 1);
        assert_eq!(cold[0], 0.0);
        assert_eq!(cold[1], 0.0);
        approx_eq(cold[2], 0.8);
        approx_eq(cold[3], 0.9);

        let green = sample_color(0.5, 2);
        approx_eq(green[1], 0.8);
        assert_eq!(green[2], 0.0);

        let red = sample_color(0.5, 7);
        approx_eq(red[0], 0.8);
        assert_eq!(red[2], 0.0);
    }

    #[test]
    fn hot_samples_fade_the_tinted_channel() {
        let hot = sample_color(0.575, 1);
        approx_eq(hot[2], 0.2);
        let hottest = sample_color(1.0, 1);
        assert_eq!(hottest[2], 0.0);
    }

    #[test]
    fn invalid_samples_are_transparent() {
        let invalid = sample_color(SENTINEL_HEIGHT, 2);
        assert_eq!(invalid[3], 0.0);
    }
}
