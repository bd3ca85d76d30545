//! Flat row types written by report backends.
//!
//! Enum columns are stored as their report strings (`SB`, `start state`,
//! `productive_time`, …) so every backend writes the same text.

use ps_analysis::{AggregatedResourceState, Kpi, ResourceStateSegment};

/// One reconstructed state segment.  The origin anchor has empty `state`,
/// `state_type` and `activity`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    pub resource:       String,
    pub time:           f64,
    pub time_type:      &'static str,
    pub used_capacity:  u32,
    pub next_time:      f64,
    pub time_increment: f64,
    pub state:          Option<String>,
    pub state_type:     Option<&'static str>,
    pub activity:       Option<&'static str>,
}

impl From<&ResourceStateSegment> for SegmentRow {
    fn from(s: &ResourceStateSegment) -> Self {
        Self {
            resource:       s.resource.clone(),
            time:           s.time,
            time_type:      s.time_type.code(),
            used_capacity:  s.used_capacity,
            next_time:      s.next_time,
            time_increment: s.time_increment,
            state:          s.state.clone(),
            state_type:     s.state_type.map(|t| t.as_str()),
            activity:       s.activity.map(|a| a.as_str()),
        }
    }
}

/// Time share of one category on one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStateRow {
    pub resource:       String,
    pub time_type:      &'static str,
    pub time_increment: f64,
    pub resource_time:  f64,
    pub percentage:     f64,
}

impl From<&AggregatedResourceState> for ResourceStateRow {
    fn from(r: &AggregatedResourceState) -> Self {
        Self {
            resource:       r.resource.clone(),
            time_type:      r.time_type.code(),
            time_increment: r.time_increment,
            resource_time:  r.resource_time,
            percentage:     r.percentage,
        }
    }
}

/// One KPI record; `context` joins the levels with `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiRow {
    pub name:         &'static str,
    pub target:       &'static str,
    pub weight:       f64,
    pub value:        f64,
    pub context:      String,
    pub resource:     Option<String>,
    pub product_type: Option<String>,
    pub product:      Option<String>,
    pub start_time:   Option<f64>,
    pub end_time:     Option<f64>,
}

impl From<&Kpi> for KpiRow {
    fn from(k: &Kpi) -> Self {
        Self {
            name:         k.name.as_str(),
            target:       k.target.as_str(),
            weight:       k.weight,
            value:        k.value,
            context:      k.context.iter().map(|l| l.as_str()).collect::<Vec<_>>().join("/"),
            resource:     k.resource.clone(),
            product_type: k.product_type.clone(),
            product:      k.product.clone(),
            start_time:   k.start_time,
            end_time:     k.end_time,
        }
    }
}
