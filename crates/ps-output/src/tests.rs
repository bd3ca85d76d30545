//! Integration tests for ps-output.

use ps_analysis::PostProcessor;
use ps_core::{Activity, Event, StateType};
use ps_log::EventLog;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One machine producing [10, 20) and a product created at 0 and finished
/// at 100.
fn small_post() -> PostProcessor {
    PostProcessor::new(EventLog::new(vec![
        Event::new(0.0, "source", "S1", StateType::Source, Activity::Created)
            .with_product("Product_1_0"),
        Event::new(10.0, "M1", "P1", StateType::Production, Activity::StartState)
            .with_product("Product_1_0")
            .with_expected_end(20.0),
        Event::new(20.0, "M1", "P1", StateType::Production, Activity::EndState)
            .with_product("Product_1_0"),
        Event::new(100.0, "sink", "K1", StateType::Sink, Activity::Finished)
            .with_product("Product_1_0"),
    ]))
}

fn unbalanced_post() -> PostProcessor {
    PostProcessor::new(EventLog::new(vec![Event::new(
        5.0, "M1", "P1", StateType::Production, Activity::EndState,
    )]))
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::writer::ReportWriter;
    use crate::{export_report, OutputError, ResourceStateRow};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("resource_states.csv").exists());
        assert!(dir.path().join("aggregated_resource_states.csv").exists());
        assert!(dir.path().join("kpis.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("aggregated_resource_states.csv")),
            ["resource", "time_type", "time_increment", "resource_time", "percentage"]
        );
        assert_eq!(headers(dir.path().join("kpis.csv"))[..4], ["name", "target", "weight", "value"]);
    }

    #[test]
    fn csv_resource_state_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_resource_states(&[ResourceStateRow {
            resource:       "M1".to_owned(),
            time_type:      "PR",
            time_increment: 10.0,
            resource_time:  100.0,
            percentage:     10.0,
        }])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("aggregated_resource_states.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "M1");
        assert_eq!(&rows[0][1], "PR");
        assert_eq!(&rows[0][4], "10");
    }

    #[test]
    fn export_writes_every_table() {
        let dir = tmp();
        let post = small_post();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let summary = export_report(&post, &mut w).unwrap();

        // Origin anchor + start + end on M1.
        assert_eq!(summary.segments, 3);
        // M1: SB and PR.
        assert_eq!(summary.resource_states, 2);
        assert_eq!(summary.kpis, post.all_kpis().unwrap().len());

        let mut rdr = csv::Reader::from_path(dir.path().join("resource_states.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        // Anchor has no source row: empty state/state_type/activity cells.
        assert_eq!(&rows[0][2], "SB");
        assert_eq!(&rows[0][6], "");
        assert_eq!(&rows[1][8], "start state");

        let mut rdr = csv::Reader::from_path(dir.path().join("kpis.csv")).unwrap();
        assert_eq!(rdr.records().count(), summary.kpis);
    }

    #[test]
    fn export_surfaces_analysis_errors() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let result = export_report(&unbalanced_post(), &mut w);
        assert!(matches!(result, Err(OutputError::Analysis(_))));
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── JSON tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod json_tests {
    use super::*;
    use crate::{write_aggregated_json, write_aggregated_json_writer};

    #[test]
    fn aggregated_json_has_report_keys() {
        let mut buf = Vec::new();
        write_aggregated_json_writer(&small_post(), &mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["Throughput"]["Product_1"], 1.0);
        assert_eq!(json["Resource states"]["M1"]["PR"], 10.0);
        assert_eq!(json["Resource states"]["M1"]["SB"], 90.0);
        assert!(json["WIP"].get("Total").is_some());
    }

    #[test]
    fn aggregated_json_file_written() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("aggregated.json");
        write_aggregated_json(&small_post(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Throughput time\""));
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::export_report;
    use crate::sqlite::SqliteWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("report.db").exists());
    }

    #[test]
    fn sqlite_report_counts() {
        let dir = tmp();
        let post = small_post();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let summary = export_report(&post, &mut w).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("report.db")).unwrap();
        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                .unwrap()
        };
        assert_eq!(count("resource_states"), summary.segments as i64);
        assert_eq!(count("aggregated_resource_states"), summary.resource_states as i64);
        assert_eq!(count("kpis"), summary.kpis as i64);
    }

    #[test]
    fn sqlite_anchor_state_is_null() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        export_report(&small_post(), &mut w).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("report.db")).unwrap();
        let state: Option<String> = conn
            .query_row(
                "SELECT state FROM resource_states WHERE resource = 'M1' ORDER BY rowid LIMIT 1",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(state, None);
    }

    #[test]
    fn sqlite_percentage_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        export_report(&small_post(), &mut w).unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("report.db")).unwrap();
        let pct: f64 = conn
            .query_row(
                "SELECT percentage FROM aggregated_resource_states \
                 WHERE resource = 'M1' AND time_type = 'PR'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!((pct - 10.0).abs() < 1e-9);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::*;
    use crate::export_report;
    use crate::parquet::ParquetWriter;
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row_count(path: std::path::PathBuf) -> usize {
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        reader.map(|b| b.unwrap().num_rows()).sum()
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("resource_states.parquet").exists());
        assert!(dir.path().join("aggregated_resource_states.parquet").exists());
        assert!(dir.path().join("kpis.parquet").exists());
    }

    #[test]
    fn parquet_report_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        let summary = export_report(&small_post(), &mut w).unwrap();

        assert_eq!(row_count(dir.path().join("resource_states.parquet")), summary.segments);
        assert_eq!(
            row_count(dir.path().join("aggregated_resource_states.parquet")),
            summary.resource_states
        );
        assert_eq!(row_count(dir.path().join("kpis.parquet")), summary.kpis);
    }

    #[test]
    fn parquet_optional_columns_nullable() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        export_report(&small_post(), &mut w).unwrap();

        let file = std::fs::File::open(dir.path().join("kpis.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();

        let start = schema.field_with_name("start_time").unwrap();
        assert_eq!(*start.data_type(), DataType::Float64);
        assert!(start.is_nullable());
        assert!(!schema.field_with_name("value").unwrap().is_nullable());
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_kpis(&[crate::KpiRow {
                name:         "output",
                target:       "max",
                weight:       1.0,
                value:        3.0,
                context:      "system/product_type".to_owned(),
                resource:     None,
                product_type: Some("Product_1".to_owned()),
                product:      None,
                start_time:   None,
                end_time:     None,
            }])
            .unwrap();
        }

        let file = std::fs::File::open(dir.path().join("kpis.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}
