//! Drive a [`ReportWriter`] from a [`PostProcessor`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ps_analysis::PostProcessor;

use crate::writer::ReportWriter;
use crate::{KpiRow, OutputResult, ResourceStateRow, SegmentRow};

/// Row counts written by [`export_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    pub segments:        usize,
    pub resource_states: usize,
    pub kpis:            usize,
}

/// Write segments, aggregated resource states and every KPI of `post`,
/// then finish the writer.
///
/// Analysis errors surface as [`OutputError::Analysis`][crate::OutputError]
/// before anything is written.
pub fn export_report<W: ReportWriter>(
    post:   &PostProcessor,
    writer: &mut W,
) -> OutputResult<ReportSummary> {
    let segments: Vec<SegmentRow> = post.resource_states()?.iter().map(SegmentRow::from).collect();
    let resource_states: Vec<ResourceStateRow> = post
        .aggregated_resource_states()?
        .iter()
        .map(ResourceStateRow::from)
        .collect();
    let kpis: Vec<KpiRow> = post.all_kpis()?.iter().map(KpiRow::from).collect();

    writer.write_segments(&segments)?;
    writer.write_resource_states(&resource_states)?;
    writer.write_kpis(&kpis)?;
    writer.finish()?;

    let summary = ReportSummary {
        segments:        segments.len(),
        resource_states: resource_states.len(),
        kpis:            kpis.len(),
    };
    tracing::debug!(
        segments        = summary.segments,
        resource_states = summary.resource_states,
        kpis            = summary.kpis,
        "report exported"
    );
    Ok(summary)
}

/// Write `post.aggregated_data()` as pretty-printed JSON to `sink`.
pub fn write_aggregated_json_writer<W: Write>(post: &PostProcessor, mut sink: W) -> OutputResult<()> {
    let data = post.aggregated_data()?;
    serde_json::to_writer_pretty(&mut sink, &data)?;
    sink.flush()?;
    Ok(())
}

/// Write `post.aggregated_data()` as pretty-printed JSON to `path`.
pub fn write_aggregated_json(post: &PostProcessor, path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_aggregated_json_writer(post, BufWriter::new(file))
}
