//! Resource-state reconstruction.
//!
//! Turns the prepared log into, per resource, a gap-free sequence of
//! segments covering `[0, horizon]`:
//!
//! ```text
//! for each resource (sorted by id, source/sink resources excluded):
//!   emit the origin anchor at t = 0          (SB, capacity 0)
//!   for each process row (loading/unloading skipped), in prepared order:
//!     apply the row to the open-bracket counters
//!     emit a segment classified from the counters *after* the row
//!   next_time  = next segment's time, or the global horizon for the last one
//!   increment  = next_time - time
//! ```
//!
//! # Counters and classification
//!
//! | Counter         | Opened / closed by                                  |
//! |-----------------|-----------------------------------------------------|
//! | `used_capacity` | start/end of every process state except Setup       |
//! | `slots`         | start/end of Production and Transport               |
//! | `breakdowns`    | start/end of Breakdown                              |
//! | `setups`        | start/end of Setup                                  |
//! | `charging`      | start/end of Charging                               |
//! | `dependencies`  | start/end of Dependency                             |
//!
//! Interrupt markers move no counter.  A segment's category is the first
//! match of UD (breakdown open) → ST → CR → PR (slots > 0) → DP → SB.
//!
//! An end with nothing open is paired with a start of the same state that
//! shares its instant (ends sort before starts), so a zero-length activity
//! leaves every counter untouched.  Any other unmatched end is an error.
//!
//! Every segment of a resource ends where the next begins and the last ends
//! at the global horizon, so segment increments telescope to exactly
//! `horizon` per resource; resources that stop logging early are still
//! compared over the same span as every other resource.

use std::collections::{BTreeMap, BTreeSet};

use ps_core::{Activity, StateCategory, StateType, TimeType};

use crate::prepared::{PreparedEvent, PreparedLog, SortPriority};
use crate::{AnalysisError, AnalysisResult};

// ── ResourceStateSegment ──────────────────────────────────────────────────────

/// One interval `[time, next_time)` of a resource's timeline.
///
/// The origin anchor has no source row: `state`, `state_type`, `activity`
/// and `priority` are `None` for it and only for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceStateSegment {
    pub resource:       String,
    pub time:           f64,
    pub time_type:      TimeType,
    /// Open non-setup process brackets after the row is applied.
    pub used_capacity:  u32,
    pub next_time:      f64,
    /// `next_time - time`, never negative.
    pub time_increment: f64,
    pub state:          Option<String>,
    pub state_type:     Option<StateType>,
    pub activity:       Option<Activity>,
    pub priority:       Option<SortPriority>,
}

impl ResourceStateSegment {
    /// `true` for the synthesized segment at `t = 0`.
    #[inline]
    pub fn is_origin_anchor(&self) -> bool {
        self.priority.is_none()
    }
}

// ── Open-bracket counters ─────────────────────────────────────────────────────

#[derive(Default, Clone, Copy, Debug)]
struct OpenBrackets {
    used_capacity: u32,
    slots:         u32,
    breakdowns:    u32,
    setups:        u32,
    charging:      u32,
    dependencies:  u32,
}

impl OpenBrackets {
    fn counter_mut(&mut self, state_type: StateType) -> Option<&mut u32> {
        if state_type.occupies_capacity() {
            return Some(&mut self.slots);
        }
        match state_type {
            StateType::Breakdown  => Some(&mut self.breakdowns),
            StateType::Setup      => Some(&mut self.setups),
            StateType::Charging   => Some(&mut self.charging),
            StateType::Dependency => Some(&mut self.dependencies),
            _ => None,
        }
    }

    /// Apply one row.  Returns `false` if it closes a bracket that is not
    /// open; the counters are then unchanged.
    fn apply(&mut self, state_type: StateType, activity: Activity) -> bool {
        let Some(counter) = self.counter_mut(state_type) else {
            return true;
        };
        let opened = match activity {
            Activity::StartState => {
                *counter += 1;
                true
            }
            Activity::EndState => match counter.checked_sub(1) {
                Some(n) => {
                    *counter = n;
                    false
                }
                None => return false,
            },
            Activity::StartInterrupt
            | Activity::EndInterrupt
            | Activity::Created
            | Activity::Finished => return true,
        };
        if state_type != StateType::Setup {
            self.used_capacity = if opened {
                self.used_capacity + 1
            } else {
                self.used_capacity.saturating_sub(1)
            };
        }
        true
    }

    fn time_type(&self) -> TimeType {
        if self.breakdowns > 0 {
            TimeType::UnscheduledDowntime
        } else if self.setups > 0 {
            TimeType::Setup
        } else if self.charging > 0 {
            TimeType::Charging
        } else if self.slots > 0 {
            TimeType::Productive
        } else if self.dependencies > 0 {
            TimeType::Dependency
        } else {
            TimeType::Standby
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Reconstruct the state segments of every resource.
///
/// `known_resources` adds resources that may never appear in the log; they
/// receive the origin anchor only (100 % standby).  Output is grouped by
/// resource in ascending id order, each group in time order.
pub fn reconstruct(
    prepared:        &PreparedLog,
    known_resources: &[String],
) -> AnalysisResult<Vec<ResourceStateSegment>> {
    let horizon = prepared.horizon();

    // ── Group process rows by resource ────────────────────────────────────
    let mut interface: BTreeSet<&str> = BTreeSet::new();
    let mut by_resource: BTreeMap<&str, Vec<&PreparedEvent>> = BTreeMap::new();

    for row in prepared.rows() {
        let resource = row.event.resource.as_str();
        match row.category {
            StateCategory::Interface => {
                interface.insert(resource);
            }
            StateCategory::Process => {
                let rows = by_resource.entry(resource).or_default();
                if !row.event.state_type.is_sub_activity() {
                    rows.push(row);
                }
            }
        }
    }
    for resource in known_resources {
        by_resource.entry(resource.as_str()).or_default();
    }
    by_resource.retain(|resource, _| !interface.contains(resource));

    // ── Scan each resource ────────────────────────────────────────────────
    let mut segments = Vec::with_capacity(prepared.len() + by_resource.len());
    for (resource, rows) in &by_resource {
        scan_resource(resource, rows, horizon, &mut segments)?;
    }

    tracing::trace!(
        resources = by_resource.len(),
        segments  = segments.len(),
        horizon,
        "reconstructed resource states"
    );
    Ok(segments)
}

// ── Per-resource scan ─────────────────────────────────────────────────────────

fn scan_resource(
    resource: &str,
    rows:     &[&PreparedEvent],
    horizon:  f64,
    out:      &mut Vec<ResourceStateSegment>,
) -> AnalysisResult<()> {
    let first = out.len();

    out.push(ResourceStateSegment {
        resource:       resource.to_owned(),
        time:           0.0,
        time_type:      TimeType::Standby,
        used_capacity:  0,
        next_time:      horizon,
        time_increment: 0.0,
        state:          None,
        state_type:     None,
        activity:       None,
        priority:       None,
    });

    let mut open = OpenBrackets::default();
    // Starts already closed by a zero-length end at the same instant.
    let mut paired: Vec<usize> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let event = &row.event;
        if !paired.contains(&i) && !open.apply(event.state_type, event.activity) {
            let Some(start) = zero_length_start(rows, i, &paired) else {
                return Err(AnalysisError::UnbalancedActivity {
                    resource:   resource.to_owned(),
                    time:       event.time,
                    state:      event.state.clone(),
                    state_type: event.state_type,
                    activity:   event.activity,
                });
            };
            paired.push(start);
        }
        out.push(ResourceStateSegment {
            resource:       resource.to_owned(),
            time:           event.time,
            time_type:      open.time_type(),
            used_capacity:  open.used_capacity,
            next_time:      horizon,
            time_increment: 0.0,
            state:          Some(event.state.clone()),
            state_type:     Some(event.state_type),
            activity:       Some(event.activity),
            priority:       Some(row.priority),
        });
    }

    // ── next_time / increments ────────────────────────────────────────────
    //
    // Shift by one within this resource; the last segment keeps `horizon`.
    let group = &mut out[first..];
    for i in 0..group.len() {
        if let Some(next) = group.get(i + 1).map(|s| s.time) {
            group[i].next_time = next;
        }
        group[i].time_increment = group[i].next_time - group[i].time;
    }
    Ok(())
}

/// Index of an unpaired start of the same state at the same instant as the
/// unmatched end `rows[end]`.
fn zero_length_start(rows: &[&PreparedEvent], end: usize, paired: &[usize]) -> Option<usize> {
    let closing = &rows[end].event;
    rows.iter()
        .enumerate()
        .skip(end + 1)
        .take_while(|(_, row)| row.event.time == closing.time)
        .find(|(j, row)| {
            !paired.contains(j)
                && row.event.activity == Activity::StartState
                && row.event.state_type == closing.state_type
                && row.event.state == closing.state
        })
        .map(|(j, _)| j)
}
