//! `ps-core`: foundational types for the prodsys post-simulation analysis
//! framework.
//!
//! This crate is a dependency of every other `ps-*` crate.  It has no `ps-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`event`]       | `Event`, `StateType`, `Activity`, `StateCategory`     |
//! | [`time_type`]   | `TimeType` (SB / PR / UD / ST / CR / DP)              |
//! | [`product`]     | `product_type` derivation from instance ids           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod event;
pub mod product;
pub mod time_type;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use event::{Activity, Event, StateCategory, StateType};
pub use product::product_type;
pub use time_type::TimeType;
