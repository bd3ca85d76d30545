//! `PostProcessor`: memoized analysis views over one event log.
//!
//! # Stages
//!
//! ```text
//! EventLog ──► PreparedLog ──► ResourceStateSegment ──► AggregatedResourceState
//!                  │                                            │
//!                  ├──► ProductLifecycle ──► output / throughput / throughput time
//!                  └──► WIP series ───────► WIP / dynamic WIP   └──► resource-state KPIs
//! ```
//!
//! Each stage is computed on first access and cached in a `OnceCell` for
//! the lifetime of the processor; repeated access returns the same data.
//! A failed stage is not cached, and retrying yields the same error.
//!
//! # Warm-up window
//!
//! Steady-state aggregates only look at `[cutoff, horizon]` with
//! `cutoff = horizon * warm_up_fraction`.  Output and throughput count
//! products *finished* in the window; throughput time averages products
//! *created* in it.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::Serialize;

use ps_core::TimeType;
use ps_log::{load_event_log_csv, EventLog};

use crate::aggregate::{aggregate, AggregatedResourceState};
use crate::kpi::{Kpi, KpiLevel, KpiName};
use crate::prepared::{prepare, PreparedLog};
use crate::products::{product_lifecycles, ProductLifecycle};
use crate::states::{reconstruct, ResourceStateSegment};
use crate::wip::{time_weighted_mean, wip_series, WipStep, TOTAL_WIP_KEY};
use crate::{AnalysisConfig, AnalysisResult, PostProcessorBuilder};

/// Map from product type (or [`TOTAL_WIP_KEY`]) to its WIP step function.
pub type WipSeries = BTreeMap<String, Vec<WipStep>>;

// ── AggregatedData ────────────────────────────────────────────────────────────

/// Steady-state aggregates keyed for JSON reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregatedData {
    /// Mean throughput time per product type.
    #[serde(rename = "Throughput time")]
    pub throughput_time: BTreeMap<String, f64>,
    /// Output count per product type.
    #[serde(rename = "Throughput")]
    pub throughput:      BTreeMap<String, f64>,
    /// Mean WIP per product type, plus `"Total"`.
    #[serde(rename = "WIP")]
    pub wip:             BTreeMap<String, f64>,
    /// Percentage per time category, per resource.
    #[serde(rename = "Resource states")]
    pub resource_states: BTreeMap<String, BTreeMap<TimeType, f64>>,
}

// ── PostProcessor ─────────────────────────────────────────────────────────────

pub struct PostProcessor {
    log:             EventLog,
    config:          AnalysisConfig,
    known_resources: Vec<String>,
    kpi_weights:     HashMap<KpiName, f64>,

    prepared:        OnceCell<PreparedLog>,
    resource_states: OnceCell<Vec<ResourceStateSegment>>,
    aggregated:      OnceCell<Vec<AggregatedResourceState>>,
    lifecycles:      OnceCell<Vec<ProductLifecycle>>,
    wip:             OnceCell<WipSeries>,
    kpis:            OnceCell<KpiLists>,
}

/// Every KPI list, computed together once.
struct KpiLists {
    output:                  Vec<Kpi>,
    throughput:              Vec<Kpi>,
    throughput_time:         Vec<Kpi>,
    dynamic_throughput_time: Vec<Kpi>,
    wip:                     Vec<Kpi>,
    dynamic_wip:             Vec<Kpi>,
    resource_states:         Vec<Kpi>,
}

impl PostProcessor {
    /// Processor with the default configuration and no registered
    /// resources.
    pub fn new(log: EventLog) -> Self {
        Self::from_parts(log, AnalysisConfig::default(), Vec::new(), HashMap::new())
    }

    pub fn builder(log: EventLog) -> PostProcessorBuilder {
        PostProcessorBuilder::new(log)
    }

    /// Load an event log CSV and wrap it with `config`.
    pub fn from_csv(path: &Path, config: AnalysisConfig) -> AnalysisResult<Self> {
        let log = load_event_log_csv(path)?;
        PostProcessorBuilder::new(log).config(config).build()
    }

    pub(crate) fn from_parts(
        log:             EventLog,
        config:          AnalysisConfig,
        known_resources: Vec<String>,
        kpi_weights:     HashMap<KpiName, f64>,
    ) -> Self {
        Self {
            log,
            config,
            known_resources,
            kpi_weights,
            prepared:        OnceCell::new(),
            resource_states: OnceCell::new(),
            aggregated:      OnceCell::new(),
            lifecycles:      OnceCell::new(),
            wip:             OnceCell::new(),
            kpis:            OnceCell::new(),
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    // ── Core stages ───────────────────────────────────────────────────────

    pub fn prepared(&self) -> AnalysisResult<&PreparedLog> {
        self.prepared.get_or_try_init(|| {
            let prepared = prepare(self.log.events())?;
            self.log_stage("prepared log", prepared.len());
            Ok(prepared)
        })
    }

    pub fn resource_states(&self) -> AnalysisResult<&[ResourceStateSegment]> {
        self.resource_states
            .get_or_try_init(|| {
                let segments = reconstruct(self.prepared()?, &self.known_resources)?;
                self.log_stage("resource states", segments.len());
                Ok(segments)
            })
            .map(Vec::as_slice)
    }

    pub fn aggregated_resource_states(&self) -> AnalysisResult<&[AggregatedResourceState]> {
        self.aggregated
            .get_or_try_init(|| {
                let rows = aggregate(self.resource_states()?)?;
                let horizon = self.horizon()?;
                debug_assert!(
                    rows.iter().all(|r| (r.resource_time - horizon).abs() <= 1e-6 * horizon.max(1.0)),
                    "resource time must equal the horizon for every resource"
                );
                self.log_stage("aggregated resource states", rows.len());
                Ok(rows)
            })
            .map(Vec::as_slice)
    }

    pub fn product_lifecycles(&self) -> AnalysisResult<&[ProductLifecycle]> {
        self.lifecycles
            .get_or_try_init(|| {
                let lifecycles = product_lifecycles(self.prepared()?);
                self.log_stage("product lifecycles", lifecycles.len());
                Ok(lifecycles)
            })
            .map(Vec::as_slice)
    }

    pub fn wip_series(&self) -> AnalysisResult<&WipSeries> {
        self.wip.get_or_try_init(|| {
            let series = wip_series(self.prepared()?);
            self.log_stage("WIP series", series.len());
            Ok(series)
        })
    }

    // ── Scalars ───────────────────────────────────────────────────────────

    /// Largest event time in the log; `0.0` when it is empty.
    pub fn horizon(&self) -> AnalysisResult<f64> {
        Ok(self.prepared()?.horizon())
    }

    pub fn warm_up_cutoff_time(&self) -> AnalysisResult<f64> {
        Ok(self.config.warm_up_cutoff(self.horizon()?))
    }

    // ── KPI lists ─────────────────────────────────────────────────────────

    /// Finished products per type in the warm-up window.
    pub fn output_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.output)
    }

    /// Output per type divided by the window length.
    pub fn throughput_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.throughput)
    }

    pub fn throughput_time_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.throughput_time)
    }

    /// One record per finished product created after the cutoff.
    pub fn dynamic_throughput_time_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.dynamic_throughput_time)
    }

    pub fn wip_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.wip)
    }

    /// One record per WIP level change, spanning until the next change.
    /// A change at the horizon holds for no time and has no record.
    pub fn dynamic_wip_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.dynamic_wip)
    }

    pub fn resource_state_kpis(&self) -> AnalysisResult<&[Kpi]> {
        Ok(&self.kpi_lists()?.resource_states)
    }

    /// Every KPI list concatenated, in the order of the accessors above.
    pub fn all_kpis(&self) -> AnalysisResult<Vec<Kpi>> {
        let k = self.kpi_lists()?;
        Ok([
            &k.output,
            &k.throughput,
            &k.throughput_time,
            &k.dynamic_throughput_time,
            &k.wip,
            &k.dynamic_wip,
            &k.resource_states,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect())
    }

    // ── Aggregated data ───────────────────────────────────────────────────

    /// Mean throughput time per product type, in type order.
    ///
    /// A type without a product created and finished in the window reports
    /// the configured sentinel; a log without products reports the sentinel
    /// alone.
    pub fn aggregated_throughput_time_data(&self) -> AnalysisResult<Vec<f64>> {
        let by_type = self.aggregated_throughput_time_data_dict()?;
        if by_type.is_empty() {
            return Ok(vec![self.config.throughput_time_sentinel]);
        }
        Ok(by_type.into_values().collect())
    }

    pub fn aggregated_throughput_time_data_dict(&self) -> AnalysisResult<BTreeMap<String, f64>> {
        Ok(self
            .throughput_time_kpis()?
            .iter()
            .filter_map(|k| Some((k.product_type.clone()?, k.value)))
            .collect())
    }

    /// Output count per product type, in type order.
    pub fn aggregated_throughput_data(&self) -> AnalysisResult<Vec<f64>> {
        Ok(self.aggregated_throughput_data_dict()?.into_values().collect())
    }

    pub fn aggregated_throughput_data_dict(&self) -> AnalysisResult<BTreeMap<String, f64>> {
        Ok(self
            .output_kpis()?
            .iter()
            .filter_map(|k| Some((k.product_type.clone()?, k.value)))
            .collect())
    }

    /// Mean WIP per product type, in type order, without the total.
    pub fn aggregated_wip_data(&self) -> AnalysisResult<Vec<f64>> {
        Ok(self
            .aggregated_wip_data_dict()?
            .into_iter()
            .filter(|(key, _)| key != TOTAL_WIP_KEY)
            .map(|(_, value)| value)
            .collect())
    }

    /// Mean WIP per product type plus the `"Total"` entry.
    pub fn aggregated_wip_data_dict(&self) -> AnalysisResult<BTreeMap<String, f64>> {
        Ok(self
            .wip_kpis()?
            .iter()
            .map(|k| {
                let key = k.product_type.clone().unwrap_or_else(|| TOTAL_WIP_KEY.to_owned());
                (key, k.value)
            })
            .collect())
    }

    pub fn aggregated_resource_states_dict(
        &self,
    ) -> AnalysisResult<BTreeMap<String, BTreeMap<TimeType, f64>>> {
        let mut out: BTreeMap<String, BTreeMap<TimeType, f64>> = BTreeMap::new();
        for row in self.aggregated_resource_states()? {
            out.entry(row.resource.clone())
                .or_default()
                .insert(row.time_type, row.percentage);
        }
        Ok(out)
    }

    pub fn aggregated_data(&self) -> AnalysisResult<AggregatedData> {
        Ok(AggregatedData {
            throughput_time: self.aggregated_throughput_time_data_dict()?,
            throughput:      self.aggregated_throughput_data_dict()?,
            wip:             self.aggregated_wip_data_dict()?,
            resource_states: self.aggregated_resource_states_dict()?,
        })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn weight(&self, name: KpiName) -> f64 {
        self.kpi_weights.get(&name).copied().unwrap_or(1.0)
    }

    fn kpi(&self, name: KpiName, value: f64, context: &[KpiLevel]) -> Kpi {
        Kpi::new(name, value, context).with_weight(self.weight(name))
    }

    fn log_stage(&self, stage: &'static str, rows: usize) {
        if self.config.verbose {
            tracing::info!(stage, rows, "analysis stage computed");
        } else {
            tracing::debug!(stage, rows, "analysis stage computed");
        }
    }

    fn kpi_lists(&self) -> AnalysisResult<&KpiLists> {
        self.kpis.get_or_try_init(|| {
            let lists = self.compute_kpis()?;
            self.log_stage(
                "KPI lists",
                lists.output.len()
                    + lists.throughput.len()
                    + lists.throughput_time.len()
                    + lists.dynamic_throughput_time.len()
                    + lists.wip.len()
                    + lists.dynamic_wip.len()
                    + lists.resource_states.len(),
            );
            Ok(lists)
        })
    }

    fn compute_kpis(&self) -> AnalysisResult<KpiLists> {
        let prepared = self.prepared()?;
        let horizon = prepared.horizon();
        let cutoff = self.config.warm_up_cutoff(horizon);
        let window = horizon - cutoff;
        let lifecycles = self.product_lifecycles()?;
        let product_types = prepared.product_types();

        let by_type = |name: KpiName, product_type: &str, value: f64| {
            self.kpi(name, value, &[KpiLevel::System, KpiLevel::ProductType])
                .with_product_type(product_type)
                .with_interval(cutoff, horizon)
        };

        // ── Output / throughput / throughput time ─────────────────────────
        let mut output = Vec::with_capacity(product_types.len());
        let mut throughput = Vec::with_capacity(product_types.len());
        let mut throughput_time = Vec::with_capacity(product_types.len());

        for &product_type in &product_types {
            let of_type = || lifecycles.iter().filter(move |l| l.product_type == product_type);

            let finished = of_type().filter(|l| l.end_time >= cutoff).count() as f64;
            let rate = if window > 0.0 { finished / window } else { 0.0 };

            let (sum, n) = of_type()
                .filter(|l| l.start_time >= cutoff)
                .fold((0.0, 0usize), |(sum, n), l| (sum + l.throughput_time, n + 1));
            let mean = if n > 0 { sum / n as f64 } else { self.config.throughput_time_sentinel };

            output.push(by_type(KpiName::Output, product_type, finished));
            throughput.push(by_type(KpiName::Throughput, product_type, rate));
            throughput_time.push(by_type(KpiName::ThroughputTime, product_type, mean));
        }

        let dynamic_throughput_time = lifecycles
            .iter()
            .filter(|l| l.start_time >= cutoff)
            .map(|l| {
                self.kpi(
                    KpiName::DynamicThroughputTime,
                    l.throughput_time,
                    &[KpiLevel::ProductType, KpiLevel::Product],
                )
                .with_product_type(l.product_type.as_str())
                .with_product(l.product.as_str())
                .with_interval(l.start_time, l.end_time)
            })
            .collect();

        // ── WIP ───────────────────────────────────────────────────────────
        let series = self.wip_series()?;
        let mut wip = Vec::with_capacity(series.len());
        let mut dynamic_wip = Vec::new();

        for (key, steps) in series {
            let tag = |kpi: Kpi| {
                if key == TOTAL_WIP_KEY {
                    kpi
                } else {
                    kpi.with_product_type(key.as_str())
                }
            };
            let context: &[KpiLevel] = if key == TOTAL_WIP_KEY {
                &[KpiLevel::System, KpiLevel::AllProducts]
            } else {
                &[KpiLevel::System, KpiLevel::ProductType]
            };

            let mean = time_weighted_mean(steps, cutoff, horizon);
            wip.push(tag(self.kpi(KpiName::Wip, mean, context).with_interval(cutoff, horizon)));

            for step in steps.iter().filter(|s| s.end_time > s.time) {
                dynamic_wip.push(tag(
                    self.kpi(KpiName::DynamicWip, f64::from(step.level), context)
                        .with_interval(step.time, step.end_time),
                ));
            }
        }

        // ── Resource states ───────────────────────────────────────────────
        let resource_states = self
            .aggregated_resource_states()?
            .iter()
            .map(|row| {
                self.kpi(
                    KpiName::for_time_type(row.time_type),
                    row.percentage,
                    &[KpiLevel::System, KpiLevel::Resource],
                )
                .with_resource(row.resource.as_str())
                .with_interval(0.0, horizon)
            })
            .collect();

        Ok(KpiLists {
            output,
            throughput,
            throughput_time,
            dynamic_throughput_time,
            wip,
            dynamic_wip,
            resource_states,
        })
    }
}
