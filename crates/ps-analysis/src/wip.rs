//! Work-in-progress step functions.
//!
//! WIP of a product type is the number of its instances created but not yet
//! finished.  Each series is a right-continuous step function over
//! `[0, horizon]`: a step holds its `level` on `[time, end_time)`, steps are
//! contiguous, and consecutive steps always differ in level.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use ps_core::Activity;

use crate::prepared::PreparedLog;

/// Key of the series summed over all product types.
pub const TOTAL_WIP_KEY: &str = "Total";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WipStep {
    pub time:     f64,
    pub level:    u32,
    pub end_time: f64,
}

/// Build one WIP series per product type plus the [`TOTAL_WIP_KEY`] series.
///
/// A finish only lowers the level when its product was created; orphan
/// finishes are reported by the lifecycle view and ignored here.
pub fn wip_series(prepared: &PreparedLog) -> BTreeMap<String, Vec<WipStep>> {
    let horizon = prepared.horizon();
    let mut levels: BTreeMap<&str, u32> = BTreeMap::new();
    let mut series: BTreeMap<String, Vec<WipStep>> = BTreeMap::new();
    let mut open: HashSet<&str> = HashSet::new();

    series.insert(TOTAL_WIP_KEY.to_owned(), vec![origin_step(horizon)]);
    for product_type in prepared.product_types() {
        series.insert(product_type.to_owned(), vec![origin_step(horizon)]);
    }

    for row in prepared.rows() {
        let (Some(product), Some(product_type)) =
            (row.event.product.as_deref(), row.product_type.as_deref())
        else {
            continue;
        };
        let delta: i8 = match row.event.activity {
            Activity::Created if open.insert(product) => 1,
            Activity::Finished if open.remove(product) => -1,
            _ => continue,
        };
        let time = row.event.time;
        for key in [product_type, TOTAL_WIP_KEY] {
            let level = levels.entry(key).or_insert(0);
            *level = if delta > 0 { *level + 1 } else { level.saturating_sub(1) };
            if let Some(steps) = series.get_mut(key) {
                record(steps, time, *level);
            }
        }
    }

    for steps in series.values_mut() {
        close(steps, horizon);
    }
    series
}

/// Level in force at `t`.
pub fn level_at(steps: &[WipStep], t: f64) -> u32 {
    steps
        .iter()
        .take_while(|s| s.time <= t)
        .last()
        .map_or(0, |s| s.level)
}

/// Time-weighted mean level over `[from, to]`; the level at `from` when the
/// window is empty.
pub fn time_weighted_mean(steps: &[WipStep], from: f64, to: f64) -> f64 {
    let span = to - from;
    if span <= 0.0 {
        return f64::from(level_at(steps, from));
    }
    let area: f64 = steps
        .iter()
        .map(|s| {
            let overlap = s.end_time.min(to) - s.time.max(from);
            if overlap > 0.0 { f64::from(s.level) * overlap } else { 0.0 }
        })
        .sum();
    area / span
}

// ── Step bookkeeping ──────────────────────────────────────────────────────────

fn origin_step(horizon: f64) -> WipStep {
    WipStep { time: 0.0, level: 0, end_time: horizon }
}

/// Append a level change at `time`, folding same-time changes into one step.
fn record(steps: &mut Vec<WipStep>, time: f64, level: u32) {
    match steps.last_mut() {
        Some(last) if last.time == time => last.level = level,
        _ => steps.push(WipStep { time, level, end_time: time }),
    }
}

/// Drop steps that repeat their predecessor's level and fill `end_time`.
fn close(steps: &mut Vec<WipStep>, horizon: f64) {
    steps.dedup_by(|next, prev| next.level == prev.level);
    let n = steps.len();
    for i in 0..n {
        steps[i].end_time = if i + 1 < n { steps[i + 1].time } else { horizon };
    }
}
