//! Per-pass analysis configuration.
//!
//! Every `PostProcessor` carries its own `AnalysisConfig`; nothing here is
//! global, so concurrent passes may run with different settings.

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, AnalysisResult};

/// Fraction of the horizon treated as warm-up and excluded from steady-state
/// aggregates (throughput, output, WIP, throughput time).
pub const WARM_UP_CUTOFF_FRACTION: f64 = 0.15;

/// Throughput time reported when none can be computed.  Large but finite so
/// an optimizer can rank a non-producing configuration as very bad.
pub const THROUGHPUT_TIME_SENTINEL: f64 = 100_000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// In `[0, 1)`.  Default: [`WARM_UP_CUTOFF_FRACTION`].
    pub warm_up_fraction: f64,

    /// Finite and > 0.  Default: [`THROUGHPUT_TIME_SENTINEL`].
    pub throughput_time_sentinel: f64,

    /// Log per-stage summaries at `info` instead of `debug`.
    pub verbose: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            warm_up_fraction:         WARM_UP_CUTOFF_FRACTION,
            throughput_time_sentinel: THROUGHPUT_TIME_SENTINEL,
            verbose:                  false,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(0.0..1.0).contains(&self.warm_up_fraction) {
            return Err(AnalysisError::Config(format!(
                "warm_up_fraction {} must lie in [0, 1)",
                self.warm_up_fraction
            )));
        }
        if !(self.throughput_time_sentinel.is_finite() && self.throughput_time_sentinel > 0.0) {
            return Err(AnalysisError::Config(format!(
                "throughput_time_sentinel {} must be finite and > 0",
                self.throughput_time_sentinel
            )));
        }
        Ok(())
    }

    /// Simulation time before which steady-state aggregates ignore data.
    #[inline]
    pub fn warm_up_cutoff(&self, horizon: f64) -> f64 {
        horizon * self.warm_up_fraction
    }
}
