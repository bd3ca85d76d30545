//! Per-resource time breakdown.

use std::collections::BTreeMap;

use serde::Serialize;

use ps_core::TimeType;

use crate::states::ResourceStateSegment;
use crate::{AnalysisError, AnalysisResult};

/// Total time a resource spent in one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregatedResourceState {
    pub resource:       String,
    pub time_type:      TimeType,
    /// Summed segment increments of this category.
    pub time_increment: f64,
    /// Summed increments over all categories of the resource; identical on
    /// every row of the same resource.
    pub resource_time:  f64,
    /// `100 * time_increment / resource_time`.
    pub percentage:     f64,
}

/// Group segments by `(resource, time_type)` and compute shares.
///
/// Rows are ordered by resource id, then by [`TimeType`] order.  Only
/// categories that occur at least once are emitted.  A resource whose total
/// time is zero reports 100 % standby (the origin anchor guarantees a
/// standby row exists).
///
/// A negative or non-finite increment is an upstream defect and is returned
/// as [`AnalysisError::NegativeIncrement`], never clamped.
pub fn aggregate(segments: &[ResourceStateSegment]) -> AnalysisResult<Vec<AggregatedResourceState>> {
    let mut sums: BTreeMap<&str, BTreeMap<TimeType, f64>> = BTreeMap::new();
    for s in segments {
        if !(s.time_increment >= 0.0 && s.time_increment.is_finite()) {
            return Err(AnalysisError::NegativeIncrement {
                resource:  s.resource.clone(),
                time:      s.time,
                increment: s.time_increment,
            });
        }
        *sums
            .entry(s.resource.as_str())
            .or_default()
            .entry(s.time_type)
            .or_insert(0.0) += s.time_increment;
    }

    let mut rows = Vec::new();
    for (resource, by_type) in sums {
        let resource_time: f64 = by_type.values().sum();
        for (time_type, time_increment) in by_type {
            let percentage = if resource_time > 0.0 {
                100.0 * time_increment / resource_time
            } else if time_type == TimeType::Standby {
                100.0
            } else {
                0.0
            };
            rows.push(AggregatedResourceState {
                resource: resource.to_owned(),
                time_type,
                time_increment,
                resource_time,
                percentage,
            });
        }
    }
    Ok(rows)
}
