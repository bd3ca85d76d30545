//! Prepared log: raw events classified, prioritised, and sorted.
//!
//! # Ordering
//!
//! Rows are sorted by `(time, resource, priority)`; rows equal on all three
//! keep their arrival order (stable sort).  The priority table puts every
//! kind of *end* before every kind of *start* at a shared timestamp, so a
//! capacity slot is released before it is re-acquired:
//!
//! | Priority | Category  | Activity          |
//! |----------|-----------|-------------------|
//! | 1        | Interface | finished product  |
//! | 2        | Interface | created product   |
//! | 3        | Process   | end interrupt     |
//! | 4        | Process   | end state         |
//! | 5        | Process   | start state       |
//! | 6        | Process   | start interrupt   |
//! | 7        | Interface | end state         |
//! | 8        | Interface | start state       |
//!
//! Any other (category, activity) pair is a data-integrity error.

use std::collections::BTreeSet;

use ps_core::{Activity, Event, StateCategory, product_type};

use crate::{AnalysisError, AnalysisResult};

// ── SortPriority ──────────────────────────────────────────────────────────────

/// Tie-break rank of a row at a shared `(time, resource)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum SortPriority {
    FinishedProduct     = 1,
    CreatedProduct      = 2,
    EndInterrupt        = 3,
    EndState            = 4,
    StartState          = 5,
    StartInterrupt      = 6,
    InterfaceEndState   = 7,
    InterfaceStartState = 8,
}

impl SortPriority {
    /// Look up the priority of a (category, activity) pair.
    pub fn of(category: StateCategory, activity: Activity) -> Option<Self> {
        use Activity as A;
        use StateCategory as C;
        match (category, activity) {
            (C::Interface, A::Finished)       => Some(SortPriority::FinishedProduct),
            (C::Interface, A::Created)        => Some(SortPriority::CreatedProduct),
            (C::Process,   A::EndInterrupt)   => Some(SortPriority::EndInterrupt),
            (C::Process,   A::EndState)       => Some(SortPriority::EndState),
            (C::Process,   A::StartState)     => Some(SortPriority::StartState),
            (C::Process,   A::StartInterrupt) => Some(SortPriority::StartInterrupt),
            (C::Interface, A::EndState)       => Some(SortPriority::InterfaceEndState),
            (C::Interface, A::StartState)     => Some(SortPriority::InterfaceStartState),
            _ => None,
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }
}

// ── PreparedEvent ─────────────────────────────────────────────────────────────

/// A raw event plus the columns derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedEvent {
    pub event:        Event,
    pub category:     StateCategory,
    /// Product instance id with its `_<n>` suffix stripped.
    pub product_type: Option<String>,
    pub priority:     SortPriority,
}

impl PreparedEvent {
    fn from_event(event: &Event) -> AnalysisResult<Self> {
        let category = event.category();
        let priority = SortPriority::of(category, event.activity).ok_or_else(|| {
            AnalysisError::UnmappedPriority {
                resource: event.resource.clone(),
                time:     event.time,
                category,
                activity: event.activity,
            }
        })?;
        Ok(Self {
            product_type: event.product.as_deref().map(|p| product_type(p).to_owned()),
            event: event.clone(),
            category,
            priority,
        })
    }
}

// ── PreparedLog ───────────────────────────────────────────────────────────────

/// The sorted, classified event table every other view is derived from.
///
/// Loading/unloading rows are kept here; the resource-state reconstruction
/// drops them itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreparedLog {
    rows:    Vec<PreparedEvent>,
    horizon: f64,
}

impl PreparedLog {
    pub fn rows(&self) -> &[PreparedEvent] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest event time over all rows; `0.0` for an empty log.
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Every product type that was created or finished, sorted.
    pub fn product_types(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .filter(|r| matches!(r.event.activity, Activity::Created | Activity::Finished))
            .filter_map(|r| r.product_type.as_deref())
            .collect()
    }
}

/// Build the prepared log from raw events.
///
/// Fails on the first invalid time or unmapped (category, activity) pair;
/// no row is ever dropped silently.
pub fn prepare(events: &[Event]) -> AnalysisResult<PreparedLog> {
    let mut rows = Vec::with_capacity(events.len());
    for event in events {
        event.validate()?;
        rows.push(PreparedEvent::from_event(event)?);
    }

    rows.sort_by(|a, b| {
        a.event
            .time
            .total_cmp(&b.event.time)
            .then_with(|| a.event.resource.cmp(&b.event.resource))
            .then_with(|| a.priority.cmp(&b.priority))
    });

    let horizon = rows.last().map_or(0.0, |r| r.event.time);
    Ok(PreparedLog { rows, horizon })
}
