use ps_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("event log is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("event log row {row}: {source}")]
    Row {
        row:    usize,
        #[source]
        source: CoreError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LogResult<T> = Result<T, LogError>;
