//! ccmgen — randomized search for a 3×3 Color Correction Matrix under a
//! per-wavelength ceiling constraint.
//!
//! Given a spectral sensitivity dataset (three response curves over a
//! wavelength grid), the search looks for a CCM that maximizes a uniform
//! output scale while keeping every per-wavelength channel response under
//! its ceiling. The pipeline stages are:
//!
//! 1. **Candidate** – draw a random 3×3 matrix, reject near-singular ones.
//! 2. **Normalize** – rescale each row so its projection onto the dataset's
//!    spectral weight equals 1.
//! 3. **Scale** – k-max ratio test: the largest uniform scale every positive
//!    response admits under its ceiling.
//! 4. **Select** – elitist loop over a fixed iteration budget, keeping the
//!    candidate with the largest scale.
//! 5. **Validate** – recompute determinant, constraint satisfaction, and the
//!    neutral-point response for the final matrix.
//!
//! # Public API
//! [`Optimizer`] and [`SpectralData`] are the primary entry points;
//! [`SearchConfig`] exposes the iteration budget, RNG seed, and rejection
//! thresholds. The lower-level stage functions live in [`search`] and
//! [`validate`].

pub mod matrix;
pub mod search;
pub mod spectrum;
pub mod validate;

mod api;

pub use api::Optimizer;
pub use matrix::MatrixError;
pub use search::{BestCcm, SearchConfig, SearchError, SearchOutcome, SearchStats};
pub use spectrum::{SpectralData, SpectrumError};

/// Validator report for a best CCM.
///
/// Field order is stable and matches the persisted form: matrix,
/// determinant, invertibility, constraint satisfaction, neutral-point RGB,
/// gray-balance flag, scale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CcmReport {
    /// The best CCM, row-major.
    pub matrix: [[f64; 3]; 3],
    /// Determinant of the best CCM.
    pub determinant: f64,
    /// Whether |determinant| exceeds the invertibility threshold.
    pub invertible: bool,
    /// Whether every per-sample channel response stays under its ceiling.
    pub constraints_met: bool,
    /// Neutral-point response: the spectral weight projected through the
    /// matrix.
    pub rgb: [f64; 3],
    /// Whether the neutral-point response is gray-balanced across channels.
    pub rgb_equal: bool,
    /// Admissible uniform scale of the best candidate.
    pub scale: f64,
}

/// Full result of one search run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchReport {
    /// Candidate accounting for the run.
    pub stats: SearchStats,
    /// Validated best CCM, absent when no candidate was accepted within the
    /// budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<CcmReport>,
}

impl SearchReport {
    /// Construct the explicit "none found" report for an exhausted run.
    pub fn failure(stats: SearchStats) -> Self {
        Self {
            stats,
            solution: None,
        }
    }

    /// Whether the run produced a solution.
    pub fn found(&self) -> bool {
        self.solution.is_some()
    }
}
