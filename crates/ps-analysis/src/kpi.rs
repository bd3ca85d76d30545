//! KPI value records handed to optimizers and reports.
//!
//! Every KPI kind is a [`KpiName`] variant; its optimisation direction and
//! display name are exhaustive matches, so adding a kind is a compile-time
//! checked change at every dispatch point.

use std::fmt;

use serde::Serialize;

use ps_core::TimeType;

// ── KpiName ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiName {
    Output,
    Throughput,
    ThroughputTime,
    DynamicThroughputTime,
    Wip,
    DynamicWip,
    ProductiveTime,
    StandbyTime,
    UnscheduledDowntime,
    SetupTime,
    ChargingTime,
    DependencyTime,
}

impl KpiName {
    /// Whether an optimizer should minimise or maximise this KPI.
    pub fn target(self) -> KpiTarget {
        match self {
            KpiName::Output                => KpiTarget::Max,
            KpiName::Throughput            => KpiTarget::Max,
            KpiName::ThroughputTime        => KpiTarget::Min,
            KpiName::DynamicThroughputTime => KpiTarget::Min,
            KpiName::Wip                   => KpiTarget::Min,
            KpiName::DynamicWip            => KpiTarget::Min,
            KpiName::ProductiveTime        => KpiTarget::Max,
            KpiName::StandbyTime           => KpiTarget::Min,
            KpiName::UnscheduledDowntime   => KpiTarget::Min,
            KpiName::SetupTime             => KpiTarget::Min,
            KpiName::ChargingTime          => KpiTarget::Min,
            KpiName::DependencyTime        => KpiTarget::Min,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KpiName::Output                => "output",
            KpiName::Throughput            => "throughput",
            KpiName::ThroughputTime        => "throughput_time",
            KpiName::DynamicThroughputTime => "dynamic_throughput_time",
            KpiName::Wip                   => "WIP",
            KpiName::DynamicWip            => "dynamic_WIP",
            KpiName::ProductiveTime        => "productive_time",
            KpiName::StandbyTime           => "standby_time",
            KpiName::UnscheduledDowntime   => "unscheduled_downtime",
            KpiName::SetupTime             => "setup_time",
            KpiName::ChargingTime          => "charging_time",
            KpiName::DependencyTime        => "dependency_time",
        }
    }

    /// The resource-state KPI reporting a time category.
    pub fn for_time_type(time_type: TimeType) -> KpiName {
        match time_type {
            TimeType::Standby             => KpiName::StandbyTime,
            TimeType::Productive          => KpiName::ProductiveTime,
            TimeType::UnscheduledDowntime => KpiName::UnscheduledDowntime,
            TimeType::Setup               => KpiName::SetupTime,
            TimeType::Charging            => KpiName::ChargingTime,
            TimeType::Dependency          => KpiName::DependencyTime,
        }
    }
}

impl fmt::Display for KpiName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── KpiTarget / KpiLevel ──────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiTarget {
    Min,
    Max,
}

impl KpiTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            KpiTarget::Min => "min",
            KpiTarget::Max => "max",
        }
    }
}

/// Scope a KPI value refers to.  A KPI's `context` lists levels from the
/// broadest to the narrowest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiLevel {
    System,
    Resource,
    AllProducts,
    ProductType,
    Product,
}

impl KpiLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            KpiLevel::System      => "system",
            KpiLevel::Resource    => "resource",
            KpiLevel::AllProducts => "all_products",
            KpiLevel::ProductType => "product_type",
            KpiLevel::Product     => "product",
        }
    }
}

// ── Kpi ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpi {
    pub name:         KpiName,
    pub target:       KpiTarget,
    pub weight:       f64,
    pub value:        f64,
    pub context:      Vec<KpiLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource:     Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product:      Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time:   Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time:     Option<f64>,
}

impl Kpi {
    /// A KPI with weight 1 and the kind's default target.
    pub fn new(name: KpiName, value: f64, context: &[KpiLevel]) -> Self {
        Self {
            name,
            target:       name.target(),
            weight:       1.0,
            value,
            context:      context.to_vec(),
            resource:     None,
            product_type: None,
            product:      None,
            start_time:   None,
            end_time:     None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Attach the interval the value holds over.
    pub fn with_interval(mut self, start_time: f64, end_time: f64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }
}
