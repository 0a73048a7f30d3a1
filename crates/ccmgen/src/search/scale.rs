//! k-max ratio test: the largest uniform scale a normalized candidate
//! admits before some channel exceeds its ceiling.

use nalgebra::Vector3;

use crate::spectrum::SpectralData;

/// Largest scale for a single normalized axis.
///
/// Only samples with a positive response constrain the axis; a non-positive
/// response can never cross the (positive) ceiling. Returns `None` when no
/// sample responds positively, since such an axis cannot be scaled usefully.
pub fn axis_max_scale(axis: &Vector3<f64>, samples: &[[f64; 3]], ceiling: &[f64]) -> Option<f64> {
    let mut max = f64::INFINITY;
    for (s, c) in samples.iter().zip(ceiling) {
        let r = s[0] * axis[0] + s[1] * axis[1] + s[2] * axis[2];
        if r > 0.0 {
            let ratio = c / r;
            if ratio < max {
                max = ratio;
            }
        }
    }
    if max.is_finite() {
        Some(max)
    } else {
        None
    }
}

/// Largest uniform scale admissible for a whole candidate: the minimum of
/// the three per-axis maxima.
///
/// Returns `None` when any axis has no positive response, or when the
/// resulting scale is non-finite or not strictly positive.
pub fn max_admissible_scale(axes: &[Vector3<f64>; 3], data: &SpectralData) -> Option<f64> {
    let samples = data.samples();
    let ceiling = data.ceiling();
    let mut k = f64::INFINITY;
    for axis in axes {
        let axis_max = axis_max_scale(axis, samples, ceiling)?;
        if axis_max < k {
            k = axis_max;
        }
    }
    if k.is_finite() && k > 0.0 {
        Some(k)
    } else {
        None
    }
}
