//! Spectral sensitivity dataset: wavelength grid, per-channel response
//! samples, and the derived ceiling curve and spectral weight.
//!
//! The dataset is immutable once constructed; the search and validator
//! borrow it for the whole run.

use std::path::Path;

use nalgebra::Vector3;

// ── Error type ─────────────────────────────────────────────────────────────

/// Errors raised while constructing or loading a spectral dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// The dataset contains no samples.
    Empty,
    /// Wavelength grid and sample sequence lengths disagree.
    LengthMismatch {
        /// Number of wavelength entries.
        wavelengths: usize,
        /// Number of response samples.
        samples: usize,
    },
    /// Explicit ceiling curve and sample sequence lengths disagree.
    CeilingMismatch {
        /// Number of ceiling entries.
        ceiling: usize,
        /// Number of response samples.
        samples: usize,
    },
    /// A response sample contains a non-finite value.
    NonFiniteSample {
        /// Index of the offending sample.
        index: usize,
    },
    /// A wavelength entry is non-finite or not strictly positive.
    InvalidWavelength {
        /// Index of the offending entry.
        index: usize,
    },
    /// A ceiling entry is non-finite or not strictly positive.
    InvalidCeiling {
        /// Index of the offending entry.
        index: usize,
    },
    /// A CSV row with a numeric wavelength could not be fully parsed.
    Parse {
        /// 1-based line number of the malformed row.
        line: usize,
    },
}

impl std::fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "dataset contains no samples"),
            Self::LengthMismatch {
                wavelengths,
                samples,
            } => write!(
                f,
                "length mismatch: {} wavelengths vs {} samples",
                wavelengths, samples
            ),
            Self::CeilingMismatch { ceiling, samples } => write!(
                f,
                "length mismatch: {} ceiling entries vs {} samples",
                ceiling, samples
            ),
            Self::NonFiniteSample { index } => {
                write!(f, "non-finite response value in sample {}", index)
            }
            Self::InvalidWavelength { index } => {
                write!(f, "wavelength {} is not finite and positive", index)
            }
            Self::InvalidCeiling { index } => {
                write!(f, "ceiling entry {} is not finite and positive", index)
            }
            Self::Parse { line } => write!(f, "malformed dataset row at line {}", line),
        }
    }
}

impl std::error::Error for SpectrumError {}

// ── Dataset ────────────────────────────────────────────────────────────────

/// Immutable spectral dataset: N wavelengths, N response triples, and the
/// per-wavelength ceiling each output channel must stay under.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralData {
    wavelengths: Vec<f64>,
    samples: Vec<[f64; 3]>,
    ceiling: Vec<f64>,
}

impl SpectralData {
    /// Build a dataset from a wavelength grid and parallel response triples.
    ///
    /// The ceiling curve is derived as `wavelength / wavelength_max`, so the
    /// admissible response grows linearly toward the top of the grid and the
    /// final entry is exactly 1.
    pub fn new(wavelengths: Vec<f64>, samples: Vec<[f64; 3]>) -> Result<Self, SpectrumError> {
        if wavelengths.len() != samples.len() {
            return Err(SpectrumError::LengthMismatch {
                wavelengths: wavelengths.len(),
                samples: samples.len(),
            });
        }
        for (i, w) in wavelengths.iter().enumerate() {
            if !w.is_finite() || *w <= 0.0 {
                return Err(SpectrumError::InvalidWavelength { index: i });
            }
        }
        let w_max = wavelengths.iter().cloned().fold(f64::MIN, f64::max);
        let ceiling = wavelengths.iter().map(|w| w / w_max).collect();
        Self::with_ceiling(wavelengths, samples, ceiling)
    }

    /// Build a dataset with an explicit ceiling curve.
    pub fn with_ceiling(
        wavelengths: Vec<f64>,
        samples: Vec<[f64; 3]>,
        ceiling: Vec<f64>,
    ) -> Result<Self, SpectrumError> {
        if samples.is_empty() {
            return Err(SpectrumError::Empty);
        }
        if wavelengths.len() != samples.len() {
            return Err(SpectrumError::LengthMismatch {
                wavelengths: wavelengths.len(),
                samples: samples.len(),
            });
        }
        if ceiling.len() != samples.len() {
            return Err(SpectrumError::CeilingMismatch {
                ceiling: ceiling.len(),
                samples: samples.len(),
            });
        }
        for (i, s) in samples.iter().enumerate() {
            if s.iter().any(|v| !v.is_finite()) {
                return Err(SpectrumError::NonFiniteSample { index: i });
            }
        }
        for (i, c) in ceiling.iter().enumerate() {
            if !c.is_finite() || *c <= 0.0 {
                return Err(SpectrumError::InvalidCeiling { index: i });
            }
        }
        Ok(Self {
            wavelengths,
            samples,
            ceiling,
        })
    }

    /// Load a dataset from a CSV file of `wavelength,r0,r1,r2[,…]` rows.
    pub fn from_csv_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Self::from_csv_str(&data).map_err(Into::into)
    }

    /// Parse a dataset from CSV text.
    ///
    /// Rows whose first field is not numeric (headers) and blank lines are
    /// skipped. A row that starts with a numeric wavelength but lacks three
    /// parsable response columns is a hard error carrying its line number.
    /// Columns beyond the fourth are ignored.
    pub fn from_csv_str(text: &str) -> Result<Self, SpectrumError> {
        let mut wavelengths = Vec::new();
        let mut samples = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',').map(str::trim);
            let Some(first) = fields.next() else {
                continue;
            };
            let Ok(w) = first.parse::<f64>() else {
                // Header or comment row.
                continue;
            };
            let mut triple = [0.0f64; 3];
            for slot in triple.iter_mut() {
                *slot = fields
                    .next()
                    .and_then(|f| f.parse::<f64>().ok())
                    .ok_or(SpectrumError::Parse { line: lineno + 1 })?;
            }
            wavelengths.push(w);
            samples.push(triple);
        }

        if samples.is_empty() {
            return Err(SpectrumError::Empty);
        }
        Self::new(wavelengths, samples)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty (never true for a constructed value).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Ordered wavelength grid.
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Per-wavelength response triples.
    pub fn samples(&self) -> &[[f64; 3]] {
        &self.samples
    }

    /// Per-wavelength response ceiling.
    pub fn ceiling(&self) -> &[f64] {
        &self.ceiling
    }

    /// Column-wise sum of the samples: the dataset's aggregate response,
    /// used for axis normalization and the gray-balance check.
    pub fn spectral_weight(&self) -> Vector3<f64> {
        let mut v = Vector3::zeros();
        for s in &self.samples {
            v[0] += s[0];
            v[1] += s[1];
            v[2] += s[2];
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_dataset() -> SpectralData {
        SpectralData::new(
            vec![400.0, 500.0, 600.0, 800.0],
            vec![
                [1.0, 0.0, 0.5],
                [0.5, 1.0, 0.0],
                [0.0, 0.5, 1.0],
                [0.25, 0.25, 0.25],
            ],
        )
        .expect("valid dataset")
    }

    #[test]
    fn test_ceiling_derivation() {
        let data = small_dataset();
        assert_relative_eq!(data.ceiling()[0], 0.5);
        assert_relative_eq!(data.ceiling()[1], 0.625);
        assert_relative_eq!(data.ceiling()[3], 1.0);
    }

    #[test]
    fn test_spectral_weight_column_sums() {
        let data = small_dataset();
        let v = data.spectral_weight();
        assert_relative_eq!(v[0], 1.75);
        assert_relative_eq!(v[1], 1.75);
        assert_relative_eq!(v[2], 1.75);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = SpectralData::new(vec![400.0], vec![[0.0; 3], [0.0; 3]]).unwrap_err();
        assert_eq!(
            err,
            SpectrumError::LengthMismatch {
                wavelengths: 1,
                samples: 2
            }
        );
    }

    #[test]
    fn test_explicit_ceiling_must_be_positive() {
        let err = SpectralData::with_ceiling(
            vec![400.0, 500.0],
            vec![[1.0; 3], [1.0; 3]],
            vec![1.0, 0.0],
        )
        .unwrap_err();
        assert_eq!(err, SpectrumError::InvalidCeiling { index: 1 });
    }

    #[test]
    fn test_csv_skips_header_and_blank_lines() {
        let text = "wavelength,x,y,z\n\n390,0.1,0.2,0.3\n391,0.4,0.5,0.6\n";
        let data = SpectralData::from_csv_str(text).expect("parses");
        assert_eq!(data.len(), 2);
        assert_relative_eq!(data.wavelengths()[0], 390.0);
        assert_relative_eq!(data.samples()[1][2], 0.6);
    }

    #[test]
    fn test_csv_ignores_extra_columns() {
        let text = "390,0.1,0.2,0.3,99.0\n780,0.4,0.5,0.6,98.0\n";
        let data = SpectralData::from_csv_str(text).expect("parses");
        assert_eq!(data.len(), 2);
        assert_relative_eq!(data.ceiling()[0], 0.5);
        assert_relative_eq!(data.ceiling()[1], 1.0);
    }

    #[test]
    fn test_csv_short_numeric_row_is_error() {
        let text = "390,0.1,0.2,0.3\n391,0.4\n";
        let err = SpectralData::from_csv_str(text).unwrap_err();
        assert_eq!(err, SpectrumError::Parse { line: 2 });
    }

    #[test]
    fn test_csv_empty_input() {
        let err = SpectralData::from_csv_str("header,only\n").unwrap_err();
        assert_eq!(err, SpectrumError::Empty);
    }
}
