//! `ps-analysis`: post-simulation analysis of production-system event logs.
//!
//! # Pipeline
//!
//! ```text
//! EventLog
//!   ① prepare      : classify rows, assign tie-break priority, sort by
//!                    (time, resource, priority)
//!   ② reconstruct  : per resource: origin anchor at t = 0, one segment per
//!                    process row, last segment ends at the global horizon
//!   ③ aggregate    : time per (resource, category) and its percentage
//!   ④ KPIs         : output, throughput, throughput time, WIP,
//!                    resource-state shares
//! ```
//!
//! [`PostProcessor`] runs the stages lazily and caches each one.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`prepared`]  | `PreparedLog`, `PreparedEvent`, `SortPriority`, `prepare` |
//! | [`states`]    | `ResourceStateSegment`, `reconstruct`                     |
//! | [`aggregate`] | `AggregatedResourceState`, `aggregate`                    |
//! | [`products`]  | `ProductLifecycle`, `product_lifecycles`                  |
//! | [`wip`]       | `WipStep`, `wip_series`, time-weighted means              |
//! | [`kpi`]       | `Kpi`, `KpiName`, `KpiTarget`, `KpiLevel`                 |
//! | [`processor`] | `PostProcessor`, `AggregatedData`                         |
//! | [`builder`]   | `PostProcessorBuilder`                                    |
//! | [`batch`]     | `analyze_batch`                                           |
//! | [`config`]    | `AnalysisConfig`, warm-up and sentinel constants          |
//! | [`error`]     | `AnalysisError`, `AnalysisResult<T>`                      |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `analyze_batch` evaluates logs on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ps_analysis::PostProcessor;
//! use ps_log::load_event_log_csv;
//!
//! let post = PostProcessor::new(load_event_log_csv(path)?);
//! for row in post.aggregated_resource_states()? {
//!     println!("{} {} {:.1}%", row.resource, row.time_type, row.percentage);
//! }
//! ```

pub mod aggregate;
pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod kpi;
pub mod prepared;
pub mod processor;
pub mod products;
pub mod states;
pub mod wip;


pub use aggregate::{aggregate, AggregatedResourceState};
pub use batch::analyze_batch;
pub use builder::PostProcessorBuilder;
pub use config::{AnalysisConfig, THROUGHPUT_TIME_SENTINEL, WARM_UP_CUTOFF_FRACTION};
pub use error::{AnalysisError, AnalysisResult};
pub use kpi::{Kpi, KpiLevel, KpiName, KpiTarget};
pub use prepared::{prepare, PreparedEvent, PreparedLog, SortPriority};
pub use processor::{AggregatedData, PostProcessor, WipSeries};
pub use products::{product_lifecycles, ProductLifecycle};
pub use states::{reconstruct, ResourceStateSegment};
pub use wip::{level_at, time_weighted_mean, wip_series, WipStep, TOTAL_WIP_KEY};
