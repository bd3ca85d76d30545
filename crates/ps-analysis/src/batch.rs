//! Evaluate many independent event logs.
//!
//! Each log gets its own [`PostProcessor`]; nothing is shared between them.
//! With the `parallel` feature the logs are spread over Rayon's thread pool,
//! otherwise they run one after another.  Results come back in input order
//! either way.

use ps_log::EventLog;

use crate::{AnalysisConfig, AnalysisResult, PostProcessor, PostProcessorBuilder};

/// Build a processor per log and apply `evaluate` to it.
///
/// A failing log does not stop the batch: its error is logged at `warn` and
/// returned in its slot, so a caller ranking candidate configurations can
/// penalise it and carry on.
pub fn analyze_batch<T, F>(
    logs:     Vec<EventLog>,
    config:   &AnalysisConfig,
    evaluate: F,
) -> Vec<AnalysisResult<T>>
where
    T: Send,
    F: Fn(&PostProcessor) -> AnalysisResult<T> + Send + Sync,
{
    let run_one = |(index, log): (usize, EventLog)| {
        let result = PostProcessorBuilder::new(log)
            .config(config.clone())
            .build()
            .and_then(|post| evaluate(&post));
        if let Err(e) = &result {
            tracing::warn!(index, error = %e, "event log evaluation failed");
        }
        result
    };

    #[cfg(not(feature = "parallel"))]
    let results = logs.into_iter().enumerate().map(run_one).collect();

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        logs.into_par_iter().enumerate().map(run_one).collect()
    };

    results
}
