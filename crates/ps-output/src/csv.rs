//! CSV report backend.
//!
//! Creates three files in the configured output directory:
//! - `resource_states.csv`
//! - `aggregated_resource_states.csv`
//! - `kpis.csv`
//!
//! Absent optional values are written as empty cells.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{KpiRow, OutputResult, ResourceStateRow, SegmentRow};

/// Writes analysis reports to three CSV files.
pub struct CsvWriter {
    segments:   Writer<File>,
    aggregates: Writer<File>,
    kpis:       Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut segments = Writer::from_path(dir.join("resource_states.csv"))?;
        segments.write_record([
            "resource", "time", "time_type", "used_capacity", "next_time",
            "time_increment", "state", "state_type", "activity",
        ])?;

        let mut aggregates = Writer::from_path(dir.join("aggregated_resource_states.csv"))?;
        aggregates.write_record([
            "resource", "time_type", "time_increment", "resource_time", "percentage",
        ])?;

        let mut kpis = Writer::from_path(dir.join("kpis.csv"))?;
        kpis.write_record([
            "name", "target", "weight", "value", "context", "resource",
            "product_type", "product", "start_time", "end_time",
        ])?;

        Ok(Self {
            segments,
            aggregates,
            kpis,
            finished: false,
        })
    }
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(T::to_string).unwrap_or_default()
}

impl ReportWriter for CsvWriter {
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()> {
        for row in rows {
            self.segments.write_record(&[
                row.resource.clone(),
                row.time.to_string(),
                row.time_type.to_owned(),
                row.used_capacity.to_string(),
                row.next_time.to_string(),
                row.time_increment.to_string(),
                opt(&row.state),
                opt(&row.state_type),
                opt(&row.activity),
            ])?;
        }
        Ok(())
    }

    fn write_resource_states(&mut self, rows: &[ResourceStateRow]) -> OutputResult<()> {
        for row in rows {
            self.aggregates.write_record(&[
                row.resource.clone(),
                row.time_type.to_owned(),
                row.time_increment.to_string(),
                row.resource_time.to_string(),
                row.percentage.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_kpis(&mut self, rows: &[KpiRow]) -> OutputResult<()> {
        for row in rows {
            self.kpis.write_record(&[
                row.name.to_owned(),
                row.target.to_owned(),
                row.weight.to_string(),
                row.value.to_string(),
                row.context.clone(),
                opt(&row.resource),
                opt(&row.product_type),
                opt(&row.product),
                opt(&row.start_time),
                opt(&row.end_time),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.segments.flush()?;
        self.aggregates.flush()?;
        self.kpis.flush()?;
        Ok(())
    }
}
