//! Matrix primitives shared by the search loop and the validator.

use nalgebra::{DMatrix, Matrix3};

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors raised by the general matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Inner dimensions of a product disagree.
    DimensionMismatch {
        /// Column count of the left operand.
        left_cols: usize,
        /// Row count of the right operand.
        right_rows: usize,
    },
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch {
                left_cols,
                right_rows,
            } => write!(
                f,
                "dimension mismatch: left has {} columns, right has {} rows",
                left_cols, right_rows
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

// ── Operations ─────────────────────────────────────────────────────────────

/// Determinant of a 3×3 matrix by cofactor expansion along the first row.
pub fn det3(m: &Matrix3<f64>) -> f64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// General matrix product `A (m×n) · B (n×p)`.
///
/// Fails when the inner dimensions disagree; this is a caller contract
/// violation and is surfaced immediately rather than retried.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, MatrixError> {
    if a.ncols() != b.nrows() {
        return Err(MatrixError::DimensionMismatch {
            left_cols: a.ncols(),
            right_rows: b.nrows(),
        });
    }
    Ok(a * b)
}

/// Serialize a `Matrix3` into a row-major nested array.
pub fn matrix3_to_array(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}
