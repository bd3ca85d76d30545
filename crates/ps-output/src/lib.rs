//! `ps-output`: report writers for prodsys post-simulation analysis.
//!
//! Three tabular backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                           |
//! |-----------|-------------|-------------------------------------------------------------------------|
//! | *(none)*  | CSV         | `resource_states.csv`, `aggregated_resource_states.csv`, `kpis.csv`     |
//! | `sqlite`  | SQLite      | `report.db`                                                             |
//! | `parquet` | Parquet     | `resource_states.parquet`, `aggregated_resource_states.parquet`, `kpis.parquet` |
//!
//! All backends implement [`ReportWriter`] and are driven by
//! [`export_report`].  The steady-state aggregates (`AggregatedData`) are
//! written as JSON by [`write_aggregated_json`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ps_output::{export_report, write_aggregated_json, CsvWriter};
//!
//! let mut writer = CsvWriter::new(Path::new("./report"))?;
//! export_report(&post, &mut writer)?;
//! write_aggregated_json(&post, Path::new("./report/aggregated.json"))?;
//! ```

pub mod csv;
pub mod error;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use report::{export_report, write_aggregated_json, write_aggregated_json_writer, ReportSummary};
pub use row::{KpiRow, ResourceStateRow, SegmentRow};
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
