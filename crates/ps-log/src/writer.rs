//! CSV event log writer, the inverse of [`crate::loader`].
//!
//! Writes the same columns the loader reads, including the pass-through
//! metadata, so a log survives a save/load cycle unchanged.

use std::io::Write;
use std::path::Path;

use ps_core::Event;

use crate::{EventLog, LogResult};

const HEADER: [&str; 9] = [
    "Time",
    "Resource",
    "State",
    "State Type",
    "Activity",
    "Product",
    "Expected End Time",
    "Origin location",
    "Target location",
];

/// Write `log` to a CSV file at `path`, creating or truncating it.
pub fn write_event_log_csv(log: &EventLog, path: &Path) -> LogResult<()> {
    let file = std::fs::File::create(path)?;
    write_event_log_writer(log, file)
}

/// Like [`write_event_log_csv`] but writes to any `Write` sink.
pub fn write_event_log_writer<W: Write>(log: &EventLog, sink: W) -> LogResult<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(HEADER)?;
    for event in log.events() {
        writer.write_record(record(event))?;
    }
    writer.flush()?;
    Ok(())
}

fn record(event: &Event) -> [String; 9] {
    [
        event.time.to_string(),
        event.resource.clone(),
        event.state.clone(),
        event.state_type.to_string(),
        event.activity.to_string(),
        event.product.clone().unwrap_or_default(),
        event.expected_end_time.map(|t| t.to_string()).unwrap_or_default(),
        event.origin_location.clone().unwrap_or_default(),
        event.target_location.clone().unwrap_or_default(),
    ]
}
