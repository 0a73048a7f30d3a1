//! Random CCM candidate generation.

use nalgebra::Matrix3;
use rand::Rng;

use crate::matrix::det3;

/// Draw a candidate matrix with all nine entries uniform on [-1, 1).
pub fn draw(rng: &mut impl Rng) -> Matrix3<f64> {
    Matrix3::from_fn(|_, _| rng.gen_range(-1.0..1.0))
}

/// Draw a candidate and reject it when its rows are near linearly dependent.
///
/// Rejection is silent and cheap; the caller simply draws again on the next
/// iteration.
pub fn draw_invertible(rng: &mut impl Rng, det_epsilon: f64) -> Option<Matrix3<f64>> {
    let m = draw(rng);
    if det3(&m).abs() < det_epsilon {
        return None;
    }
    Some(m)
}
