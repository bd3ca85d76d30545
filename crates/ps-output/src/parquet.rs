//! Parquet report backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `resource_states.parquet`
//! - `aggregated_resource_states.parquet`
//! - `kpis.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::ReportWriter;
use crate::{KpiRow, OutputResult, ResourceStateRow, SegmentRow};

fn segment_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("resource",       DataType::Utf8,    false),
        Field::new("time",           DataType::Float64, false),
        Field::new("time_type",      DataType::Utf8,    false),
        Field::new("used_capacity",  DataType::UInt32,  false),
        Field::new("next_time",      DataType::Float64, false),
        Field::new("time_increment", DataType::Float64, false),
        Field::new("state",          DataType::Utf8,    true),
        Field::new("state_type",     DataType::Utf8,    true),
        Field::new("activity",       DataType::Utf8,    true),
    ]))
}

fn aggregate_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("resource",       DataType::Utf8,    false),
        Field::new("time_type",      DataType::Utf8,    false),
        Field::new("time_increment", DataType::Float64, false),
        Field::new("resource_time",  DataType::Float64, false),
        Field::new("percentage",     DataType::Float64, false),
    ]))
}

fn kpi_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("name",         DataType::Utf8,    false),
        Field::new("target",       DataType::Utf8,    false),
        Field::new("weight",       DataType::Float64, false),
        Field::new("value",        DataType::Float64, false),
        Field::new("context",      DataType::Utf8,    false),
        Field::new("resource",     DataType::Utf8,    true),
        Field::new("product_type", DataType::Utf8,    true),
        Field::new("product",      DataType::Utf8,    true),
        Field::new("start_time",   DataType::Float64, true),
        Field::new("end_time",     DataType::Float64, true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// One Parquet file and the schema its batches follow.
struct Table {
    writer: Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl Table {
    fn create(path: &Path, schema: Arc<Schema>) -> OutputResult<Self> {
        let file = File::create(path)?;
        let writer = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { writer: Some(writer), schema })
    }

    fn write(&mut self, columns: Vec<ArrayRef>) -> OutputResult<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(w) = self.writer.take() {
            w.close()?;
        }
        Ok(())
    }
}

/// Writes analysis reports to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    segments:   Table,
    aggregates: Table,
    kpis:       Table,
}

impl ParquetWriter {
    /// Create the three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        Ok(Self {
            segments:   Table::create(&dir.join("resource_states.parquet"), segment_schema())?,
            aggregates: Table::create(&dir.join("aggregated_resource_states.parquet"), aggregate_schema())?,
            kpis:       Table::create(&dir.join("kpis.parquet"), kpi_schema())?,
        })
    }
}

impl ReportWriter for ParquetWriter {
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut resources  = StringBuilder::new();
        let mut times      = Float64Builder::new();
        let mut time_types = StringBuilder::new();
        let mut capacities = UInt32Builder::new();
        let mut next_times = Float64Builder::new();
        let mut increments = Float64Builder::new();
        let mut states     = StringBuilder::new();
        let mut types      = StringBuilder::new();
        let mut activities = StringBuilder::new();

        for row in rows {
            resources.append_value(&row.resource);
            times.append_value(row.time);
            time_types.append_value(row.time_type);
            capacities.append_value(row.used_capacity);
            next_times.append_value(row.next_time);
            increments.append_value(row.time_increment);
            states.append_option(row.state.as_deref());
            types.append_option(row.state_type);
            activities.append_option(row.activity);
        }

        self.segments.write(vec![
            Arc::new(resources.finish()),
            Arc::new(times.finish()),
            Arc::new(time_types.finish()),
            Arc::new(capacities.finish()),
            Arc::new(next_times.finish()),
            Arc::new(increments.finish()),
            Arc::new(states.finish()),
            Arc::new(types.finish()),
            Arc::new(activities.finish()),
        ])
    }

    fn write_resource_states(&mut self, rows: &[ResourceStateRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut resources      = StringBuilder::new();
        let mut time_types     = StringBuilder::new();
        let mut increments     = Float64Builder::new();
        let mut resource_times = Float64Builder::new();
        let mut percentages    = Float64Builder::new();

        for row in rows {
            resources.append_value(&row.resource);
            time_types.append_value(row.time_type);
            increments.append_value(row.time_increment);
            resource_times.append_value(row.resource_time);
            percentages.append_value(row.percentage);
        }

        self.aggregates.write(vec![
            Arc::new(resources.finish()),
            Arc::new(time_types.finish()),
            Arc::new(increments.finish()),
            Arc::new(resource_times.finish()),
            Arc::new(percentages.finish()),
        ])
    }

    fn write_kpis(&mut self, rows: &[KpiRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut names         = StringBuilder::new();
        let mut targets       = StringBuilder::new();
        let mut weights       = Float64Builder::new();
        let mut values        = Float64Builder::new();
        let mut contexts      = StringBuilder::new();
        let mut resources     = StringBuilder::new();
        let mut product_types = StringBuilder::new();
        let mut products      = StringBuilder::new();
        let mut start_times   = Float64Builder::new();
        let mut end_times     = Float64Builder::new();

        for row in rows {
            names.append_value(row.name);
            targets.append_value(row.target);
            weights.append_value(row.weight);
            values.append_value(row.value);
            contexts.append_value(&row.context);
            resources.append_option(row.resource.as_deref());
            product_types.append_option(row.product_type.as_deref());
            products.append_option(row.product.as_deref());
            start_times.append_option(row.start_time);
            end_times.append_option(row.end_time);
        }

        self.kpis.write(vec![
            Arc::new(names.finish()),
            Arc::new(targets.finish()),
            Arc::new(weights.finish()),
            Arc::new(values.finish()),
            Arc::new(contexts.finish()),
            Arc::new(resources.finish()),
            Arc::new(product_types.finish()),
            Arc::new(products.finish()),
            Arc::new(start_times.finish()),
            Arc::new(end_times.finish()),
        ])
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.segments.close()?;
        self.aggregates.close()?;
        self.kpis.close()?;
        Ok(())
    }
}
