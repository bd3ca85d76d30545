//! The `ReportWriter` trait implemented by all backend writers.

use crate::{KpiRow, OutputResult, ResourceStateRow, SegmentRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// Each `write_*` call appends a batch; it may be called repeatedly, e.g.
/// once per analysed log.
pub trait ReportWriter {
    /// Write a batch of reconstructed state segments.
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()>;

    /// Write a batch of per-resource time shares.
    fn write_resource_states(&mut self, rows: &[ResourceStateRow]) -> OutputResult<()>;

    /// Write a batch of KPI records.
    fn write_kpis(&mut self, rows: &[KpiRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
