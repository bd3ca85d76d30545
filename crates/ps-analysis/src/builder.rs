//! Fluent builder for constructing a [`PostProcessor`].

use std::collections::HashMap;

use ps_log::EventLog;

use crate::kpi::KpiName;
use crate::{AnalysisConfig, AnalysisError, AnalysisResult, PostProcessor};

/// Fluent builder for [`PostProcessor`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                        |
/// |-------------------------|--------------------------------|
/// | `.config(c)`            | `AnalysisConfig::default()`    |
/// | `.resources(ids)`       | Only resources seen in the log |
/// | `.kpi_weight(name, w)`  | Weight `1.0` for every KPI     |
///
/// # Example
///
/// ```rust,ignore
/// let post = PostProcessorBuilder::new(log)
///     .config(AnalysisConfig { verbose: true, ..Default::default() })
///     .resources(["M1", "M2", "TR1"])
///     .kpi_weight(KpiName::Throughput, 2.0)
///     .build()?;
/// let states = post.aggregated_resource_states()?;
/// ```
pub struct PostProcessorBuilder {
    log:         EventLog,
    config:      AnalysisConfig,
    resources:   Vec<String>,
    kpi_weights: HashMap<KpiName, f64>,
}

impl PostProcessorBuilder {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            config:      AnalysisConfig::default(),
            resources:   Vec::new(),
            kpi_weights: HashMap::new(),
        }
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Register the resources of the simulated system.
    ///
    /// A registered resource that never appears in the log still gets the
    /// origin anchor and reports 100 % standby.  Source and sink resources
    /// are still excluded once the log shows them as such.
    pub fn resources<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Weight attached to every KPI record of kind `name`.
    pub fn kpi_weight(mut self, name: KpiName, weight: f64) -> Self {
        self.kpi_weights.insert(name, weight);
        self
    }

    /// Validate the configuration and weights and return the processor.
    ///
    /// No analysis runs here; every stage is computed on first access.
    pub fn build(self) -> AnalysisResult<PostProcessor> {
        self.config.validate()?;
        for (name, &weight) in &self.kpi_weights {
            if !weight.is_finite() {
                return Err(AnalysisError::Config(format!(
                    "weight {weight} of KPI {name} must be finite"
                )));
            }
        }

        let mut resources = self.resources;
        resources.sort();
        resources.dedup();

        Ok(PostProcessor::from_parts(
            self.log,
            self.config,
            resources,
            self.kpi_weights,
        ))
    }
}
