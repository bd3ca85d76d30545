//! `ps-log`: the simulation event log and its CSV persistence.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`log`]     | `EventLog` (owned, arrival-ordered `Vec<Event>`)          |
//! | [`loader`]  | `load_event_log_csv`, `load_event_log_reader`             |
//! | [`writer`]  | `write_event_log_csv`, `write_event_log_writer`           |
//! | [`error`]   | `LogError`, `LogResult<T>`                                |
//!
//! # CSV format
//!
//! ```csv
//! ,Time,Resource,State,State Type,Activity,Product,Expected End Time,Origin location,Target location
//! 0,0.0,source_1,S1,Source,created product,Product_1_0,,,
//! 1,1.5,M1,P1,Production,start state,Product_1_0,4.5,,
//! 2,4.5,M1,P1,Production,end state,Product_1_0,,,
//! ```
//!
//! The leading index column (empty header, or `Unnamed: 0`) is ignored.

pub mod error;
pub mod loader;
pub mod log;
pub mod writer;

#[cfg(test)]
mod tests;

pub use error::{LogError, LogResult};
pub use loader::{load_event_log_csv, load_event_log_reader, REQUIRED_COLUMNS};
pub use log::EventLog;
pub use writer::{write_event_log_csv, write_event_log_writer};
