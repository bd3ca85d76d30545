//! `EventLog`: the immutable input of one post-processing pass.

use std::collections::BTreeSet;

use ps_core::{CoreResult, Event};

/// All events of one completed simulation run, in arrival order.
///
/// Arrival order is kept as-is; it is the final tie-break when two rows share
/// time, resource and ordering priority.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Read-only slice of all events, in arrival order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Largest event time, or `0.0` for an empty log.
    pub fn horizon(&self) -> f64 {
        self.events.iter().map(|e| e.time).fold(0.0, f64::max)
    }

    /// Distinct resource ids, sorted.
    pub fn resources(&self) -> BTreeSet<&str> {
        self.events.iter().map(|e| e.resource.as_str()).collect()
    }

    /// Check every event time; fails on the first invalid one.
    pub fn validate(&self) -> CoreResult<()> {
        self.events.iter().try_for_each(Event::validate)
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}
