//! Finite-difference normal estimation over a height field.
//!
//! Normals are approximated from central differences of the reconstructed
//! height values. Samples on the grid boundary, and samples with a sentineled
//! neighbor on either axis, get the zero normal: no reliable gradient exists
//! there.
use glam::Vec3;

use crate::field::sampler::HeightField;

/// Estimates one normal per grid sample, in grid iteration order.
pub fn estimate_normals(field: &HeightField) -> Vec<Vec3> {
    let grid = field.grid();
    let dimension = grid.dimension();
    let step = grid.step();
    let mut normals = vec![Vec3::ZERO; grid.sample_count()];

    for row in 1..dimension - 1 {
        for col in 1..dimension - 1 {
            let left = field.height(col - 1, row);
            let right = field.height(col + 1, row);
            if left < 0.0 || right < 0.0 {
                continue;
            }

            let down = field.height(col, row - 1);
            let up = field.height(col, row + 1);
            if down < 0.0 || up < 0.0 {
                continue;
            }

            let partial_x = (field.reconstruct(right) - field.reconstruct(left)) / (2.0 * step);
            let partial_y = (field.reconstruct(up) - field.reconstruct(down)) / (2.0 * step);

            let tangent_x = Vec3::new(1.0, partial_x, 0.0);
            let tangent_y = Vec3::new(0.0, partial_y, 1.0);

            normals[grid.index(col, row)] = tangent_y.cross(tangent_x).normalize_or_zero();
        }
    }

    normals
}
