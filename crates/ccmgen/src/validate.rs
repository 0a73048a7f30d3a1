//! Post-search validation of the best CCM.
//!
//! Recomputes everything the search only guaranteed per-axis at scaling
//! time: determinant, the full N×3 response surface against the ceiling,
//! and the neutral-point response triple.

use crate::matrix::{det3, matrix3_to_array};
use crate::search::{BestCcm, SearchOutcome};
use crate::spectrum::SpectralData;
use crate::{CcmReport, SearchReport};

/// Invertibility threshold on the recomputed determinant.
pub const DET_EPSILON: f64 = 1e-10;

/// Tolerance for the channel-equality (gray balance) check.
pub const RGB_EQUALITY_TOL: f64 = 1e-6;

/// Validate a best candidate against the dataset it was searched on.
///
/// Pure and idempotent: the same inputs always produce the same report.
/// The ceiling re-check is strict (`<=` with no tolerance), matching the
/// comparison the ratio test optimized against.
pub fn validate(best: &BestCcm, data: &SpectralData) -> CcmReport {
    let det = det3(&best.matrix);

    // SSF[i][c] = Σ_k samples[i][k] · matrix[(k, c)]
    let mut constraints_met = true;
    'rows: for (s, c) in data.samples().iter().zip(data.ceiling()) {
        for channel in 0..3 {
            let r = s[0] * best.matrix[(0, channel)]
                + s[1] * best.matrix[(1, channel)]
                + s[2] * best.matrix[(2, channel)];
            if r > *c {
                constraints_met = false;
                break 'rows;
            }
        }
    }

    let weight = data.spectral_weight();
    let mut rgb = [0.0f64; 3];
    for (channel, out) in rgb.iter_mut().enumerate() {
        for j in 0..3 {
            *out += weight[j] * best.matrix[(j, channel)];
        }
    }
    let rgb_equal =
        (rgb[0] - rgb[1]).abs() < RGB_EQUALITY_TOL && (rgb[1] - rgb[2]).abs() < RGB_EQUALITY_TOL;

    CcmReport {
        matrix: matrix3_to_array(&best.matrix),
        determinant: det,
        invertible: det.abs() > DET_EPSILON,
        constraints_met,
        rgb,
        rgb_equal,
        scale: best.scale,
    }
}

/// Attach validation to a search outcome, producing the full report.
///
/// An outcome without an accepted candidate maps to the explicit failure
/// report rather than an error: exhaustion is a valid result of a
/// randomized search.
pub fn report(outcome: &SearchOutcome, data: &SpectralData) -> SearchReport {
    match &outcome.best {
        Some(best) => SearchReport {
            stats: outcome.stats,
            solution: Some(validate(best, data)),
        },
        None => SearchReport::failure(outcome.stats),
    }
}
