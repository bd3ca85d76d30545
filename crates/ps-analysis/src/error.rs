use ps_core::{Activity, CoreError, StateCategory, StateType};
use ps_log::LogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis configuration error: {0}")]
    Config(String),

    #[error("no ordering priority for {category} / {activity} (resource {resource:?}, t={time})")]
    UnmappedPriority {
        resource: String,
        time:     f64,
        category: StateCategory,
        activity: Activity,
    },

    #[error("{activity} of {state_type} state {state:?} on resource {resource:?} at t={time} has no open start")]
    UnbalancedActivity {
        resource:   String,
        time:       f64,
        state:      String,
        state_type: StateType,
        activity:   Activity,
    },

    #[error("negative time increment {increment} on resource {resource:?} at t={time}")]
    NegativeIncrement {
        resource:  String,
        time:      f64,
        increment: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("event log error: {0}")]
    Log(#[from] LogError),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
