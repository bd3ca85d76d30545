//! SQLite report backend (feature `sqlite`).
//!
//! Creates a single `report.db` file in the configured output directory with
//! three tables: `resource_states`, `aggregated_resource_states` and `kpis`.
//! Absent optional values are stored as `NULL`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::ReportWriter;
use crate::{KpiRow, OutputResult, ResourceStateRow, SegmentRow};

/// Writes analysis reports to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `report.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("report.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS resource_states (
                 resource       TEXT    NOT NULL,
                 time           REAL    NOT NULL,
                 time_type      TEXT    NOT NULL,
                 used_capacity  INTEGER NOT NULL,
                 next_time      REAL    NOT NULL,
                 time_increment REAL    NOT NULL,
                 state          TEXT,
                 state_type     TEXT,
                 activity       TEXT
             );
             CREATE TABLE IF NOT EXISTS aggregated_resource_states (
                 resource       TEXT NOT NULL,
                 time_type      TEXT NOT NULL,
                 time_increment REAL NOT NULL,
                 resource_time  REAL NOT NULL,
                 percentage     REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS kpis (
                 name         TEXT NOT NULL,
                 target       TEXT NOT NULL,
                 weight       REAL NOT NULL,
                 value        REAL NOT NULL,
                 context      TEXT NOT NULL,
                 resource     TEXT,
                 product_type TEXT,
                 product      TEXT,
                 start_time   REAL,
                 end_time     REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl ReportWriter for SqliteWriter {
    fn write_segments(&mut self, rows: &[SegmentRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO resource_states \
                 (resource, time, time_type, used_capacity, next_time, time_increment, \
                  state, state_type, activity) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.resource,
                    row.time,
                    row.time_type,
                    row.used_capacity,
                    row.next_time,
                    row.time_increment,
                    row.state,
                    row.state_type,
                    row.activity,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_resource_states(&mut self, rows: &[ResourceStateRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO aggregated_resource_states \
                 (resource, time_type, time_increment, resource_time, percentage) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.resource,
                    row.time_type,
                    row.time_increment,
                    row.resource_time,
                    row.percentage,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_kpis(&mut self, rows: &[KpiRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO kpis \
                 (name, target, weight, value, context, resource, product_type, product, \
                  start_time, end_time) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.name,
                    row.target,
                    row.weight,
                    row.value,
                    row.context,
                    row.resource,
                    row.product_type,
                    row.product,
                    row.start_time,
                    row.end_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
