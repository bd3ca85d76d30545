//! CSV event log loader.
//!
//! One row per event.  Columns are matched by header name, so their order is
//! free and extra columns (the stray index column written by dataframe
//! exports in particular) are ignored.
//!
//! | Column              | Required | Parsed as                           |
//! |---------------------|----------|-------------------------------------|
//! | `Time`              | yes      | `f64` minutes, finite and ≥ 0       |
//! | `Resource`          | yes      | resource id                         |
//! | `State`             | yes      | state id                            |
//! | `State Type`        | yes      | [`StateType`]                       |
//! | `Activity`          | yes      | [`Activity`]                        |
//! | `Product`           | yes      | optional product instance id        |
//! | `Expected End Time` | yes      | optional `f64`                      |
//! | `Origin location`   | no       | optional, passed through            |
//! | `Target location`   | no       | optional, passed through            |
//!
//! Empty cells in optional columns load as `None`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ps_core::{Activity, Event, StateType};

use crate::{EventLog, LogError, LogResult};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Time",
    "Resource",
    "State",
    "State Type",
    "Activity",
    "Product",
    "Expected End Time",
];

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EventRecord {
    #[serde(rename = "Time")]
    time:              f64,
    #[serde(rename = "Resource")]
    resource:          String,
    #[serde(rename = "State")]
    state:             String,
    #[serde(rename = "State Type")]
    state_type:        String,
    #[serde(rename = "Activity")]
    activity:          String,
    #[serde(rename = "Product")]
    product:           Option<String>,
    #[serde(rename = "Expected End Time")]
    expected_end_time: Option<f64>,
    #[serde(rename = "Origin location", default)]
    origin_location:   Option<String>,
    #[serde(rename = "Target location", default)]
    target_location:   Option<String>,
}

impl EventRecord {
    fn into_event(self) -> Result<Event, ps_core::CoreError> {
        let event = Event {
            time:              self.time,
            resource:          self.resource,
            state:             self.state,
            state_type:        self.state_type.parse::<StateType>()?,
            activity:          self.activity.parse::<Activity>()?,
            product:           non_blank(self.product),
            expected_end_time: self.expected_end_time,
            origin_location:   non_blank(self.origin_location),
            target_location:   non_blank(self.target_location),
        };
        event.validate()?;
        Ok(event)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an event log from a CSV file.
pub fn load_event_log_csv(path: &Path) -> LogResult<EventLog> {
    let file = std::fs::File::open(path).map_err(LogError::Io)?;
    let log = load_event_log_reader(file)?;
    tracing::debug!(path = %path.display(), events = log.len(), "loaded event log");
    Ok(log)
}

/// Like [`load_event_log_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for logs streamed from
/// a simulation worker.
pub fn load_event_log_reader<R: Read>(reader: R) -> LogResult<EventLog> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    // ── Validate header ───────────────────────────────────────────────────
    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LogError::MissingColumn(column));
        }
    }

    // ── Parse rows ────────────────────────────────────────────────────────
    let mut events = Vec::new();
    for (i, result) in csv_reader.deserialize::<EventRecord>().enumerate() {
        let record = result?;
        let event = record
            .into_event()
            .map_err(|source| LogError::Row { row: i + 1, source })?;
        events.push(event);
    }

    Ok(EventLog::new(events))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}
