//! High-level search API.
//!
//! [`Optimizer`] is the primary entry point: it wraps a [`SearchConfig`]
//! and turns a dataset into a validated [`SearchReport`] in one call.

use crate::search::{self, SearchConfig};
use crate::spectrum::SpectralData;
use crate::{validate, SearchReport};

/// Primary search interface.
///
/// Create once, run on many datasets; runs with the same configuration and
/// dataset are bit-for-bit reproducible.
///
/// # Examples
///
/// ```
/// use ccmgen::{Optimizer, SearchConfig, SpectralData};
///
/// let data = SpectralData::new(
///     vec![400.0, 550.0, 700.0],
///     vec![[0.8, 0.1, 0.0], [0.2, 0.9, 0.3], [0.0, 0.2, 0.7]],
/// )
/// .unwrap();
/// let optimizer = Optimizer::with_config(SearchConfig {
///     max_iters: 1_000,
///     ..Default::default()
/// });
/// let report = optimizer.run(&data);
/// assert!(report.found());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: SearchConfig,
}

impl Optimizer {
    /// Create an optimizer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an optimizer with full configuration control.
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search and validate the best candidate.
    ///
    /// Always returns a report; an exhausted budget yields the explicit
    /// failure report rather than an error.
    pub fn run(&self, data: &SpectralData) -> SearchReport {
        let outcome = search::search(data, &self.config);
        validate::report(&outcome, data)
    }
}
