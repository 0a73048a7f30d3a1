//! Axis normalization against the dataset's spectral weight.

use nalgebra::{Matrix3, Vector3};

/// Normalize each row of the candidate so its projection onto the spectral
/// weight equals 1.
///
/// Returns `None` when any row's projection is within `projection_epsilon`
/// of zero: such an axis has no meaningful response to the aggregate
/// spectrum and cannot be scaled. Normalizing every axis to unit weighted
/// response is what makes the subsequent ratio test comparable across axes.
pub fn normalize_axes(
    candidate: &Matrix3<f64>,
    weight: &Vector3<f64>,
    projection_epsilon: f64,
) -> Option<[Vector3<f64>; 3]> {
    let mut axes = [Vector3::zeros(); 3];
    for j in 0..3 {
        let row = Vector3::new(candidate[(j, 0)], candidate[(j, 1)], candidate[(j, 2)]);
        let dot = row.dot(weight);
        if dot.abs() < projection_epsilon {
            return None;
        }
        axes[j] = row / dot;
    }
    Some(axes)
}
