//! Unit tests for ps-log.

use std::io::Cursor;

use ps_core::{Activity, Event, StateType};

use crate::{load_event_log_reader, write_event_log_writer, EventLog, LogError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A dataframe-style export: leading unnamed index column, spaced activity
/// names, `XxxState` state types, and empty optional cells.
const LOG_CSV: &str = "\
,Time,Resource,State,State Type,Activity,Product,Expected End Time,Origin location,Target location\n\
0,0.0,source_1,S1,SourceState,created product,Product_1_0,,,\n\
1,1.5,TR1,TP1,TransportState,start state,Product_1_0,3.0,\"[0, 0]\",\"[5, 0]\"\n\
2,3.0,TR1,TP1,TransportState,end state,Product_1_0,,,\n\
3,3.0,M1,P1,ProductionState,start state,Product_1_0,7.0,,\n\
4,7.0,M1,P1,ProductionState,end state,Product_1_0,,,\n\
5,7.0,sink_1,K1,SinkState,finished product,Product_1_0,,,\n\
";

fn load(csv: &str) -> Result<EventLog, LogError> {
    load_event_log_reader(Cursor::new(csv.to_owned()))
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[test]
    fn loads_all_rows_in_arrival_order() {
        let log = load(LOG_CSV).unwrap();
        assert_eq!(log.len(), 6);
        let resources: Vec<&str> = log.events().iter().map(|e| e.resource.as_str()).collect();
        assert_eq!(resources, ["source_1", "TR1", "TR1", "M1", "M1", "sink_1"]);
    }

    #[test]
    fn parses_enums_and_optional_cells() {
        let log = load(LOG_CSV).unwrap();
        let transport = &log.events()[1];
        assert_eq!(transport.state_type, StateType::Transport);
        assert_eq!(transport.activity, Activity::StartState);
        assert_eq!(transport.expected_end_time, Some(3.0));
        assert_eq!(transport.origin_location.as_deref(), Some("[0, 0]"));
        assert_eq!(transport.target_location.as_deref(), Some("[5, 0]"));

        let end = &log.events()[2];
        assert_eq!(end.expected_end_time, None);
        assert_eq!(end.origin_location, None);
    }

    #[test]
    fn location_columns_are_optional() {
        let csv = "\
Time,Resource,State,State Type,Activity,Product,Expected End Time\n\
2.0,M1,P1,Production,start_state,Product_1_0,5.0\n\
";
        let log = load(csv).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].origin_location, None);
    }

    #[test]
    fn missing_required_column_fails_fast() {
        let csv = "\
Time,Resource,State,Activity,Product,Expected End Time\n\
2.0,M1,P1,start state,Product_1_0,5.0\n\
";
        match load(csv) {
            Err(LogError::MissingColumn(col)) => assert_eq!(col, "State Type"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unknown_activity_reports_row() {
        let csv = "\
Time,Resource,State,State Type,Activity,Product,Expected End Time\n\
2.0,M1,P1,Production,start state,,\n\
3.0,M1,P1,Production,teleported,,\n\
";
        match load(csv) {
            Err(LogError::Row { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected Row error, got {other:?}"),
        }
    }

    #[test]
    fn negative_time_rejected() {
        let csv = "\
Time,Resource,State,State Type,Activity,Product,Expected End Time\n\
-1.0,M1,P1,Production,start state,,\n\
";
        assert!(matches!(load(csv), Err(LogError::Row { row: 1, .. })));
    }

    #[test]
    fn empty_log_has_zero_horizon() {
        let csv = "Time,Resource,State,State Type,Activity,Product,Expected End Time\n";
        let log = load(csv).unwrap();
        assert!(log.is_empty());
        assert_eq!(log.horizon(), 0.0);
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_log_tests {
    use super::*;

    #[test]
    fn horizon_is_max_time_not_last_row() {
        let log: EventLog = vec![
            Event::new(9.0, "M1", "P1", StateType::Production, Activity::EndState),
            Event::new(4.0, "M2", "P1", StateType::Production, Activity::EndState),
        ]
        .into();
        assert_eq!(log.horizon(), 9.0);
    }

    #[test]
    fn validate_rejects_negative_time() {
        let mut log = load(LOG_CSV).unwrap();
        assert!(log.validate().is_ok());
        log.push(Event::new(-1.0, "M1", "P1", StateType::Production, Activity::StartState));
        assert!(log.validate().is_err());
    }

    #[test]
    fn resources_are_distinct_and_sorted() {
        let log = load(LOG_CSV).unwrap();
        let resources: Vec<&str> = log.resources().into_iter().collect();
        assert_eq!(resources, ["M1", "TR1", "sink_1", "source_1"]);
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod writer_tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_metadata() {
        let original = load(LOG_CSV).unwrap();

        let mut buf = Vec::new();
        write_event_log_writer(&original, &mut buf).unwrap();
        let reloaded = load_event_log_reader(Cursor::new(buf)).unwrap();

        assert_eq!(reloaded, original);
    }
}
