//! The raw event record written by the simulation, and its state vocabulary.
//!
//! One `Event` is one row of the simulation's event log: a resource state
//! transition (start/end of a process, an interrupt) or a product lifecycle
//! marker (creation at a source, finish at a sink).  The log is ordered by
//! arrival, not necessarily by time.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── StateType ─────────────────────────────────────────────────────────────────

/// Kind of state a log row belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateType {
    Production,
    Transport,
    Breakdown,
    Setup,
    Charging,
    Dependency,
    Source,
    Sink,
    Loading,
    Unloading,
}

impl StateType {
    /// Coarse category: source/sink rows are interface states, everything
    /// else is a process state.
    #[inline]
    pub fn category(self) -> StateCategory {
        match self {
            StateType::Source | StateType::Sink => StateCategory::Interface,
            _ => StateCategory::Process,
        }
    }

    /// `true` for loading/unloading, which describe detail inside a
    /// transport and never top-level resource occupancy.
    #[inline]
    pub fn is_sub_activity(self) -> bool {
        matches!(self, StateType::Loading | StateType::Unloading)
    }

    /// `true` for the kinds that hold one capacity slot while open.
    #[inline]
    pub fn occupies_capacity(self) -> bool {
        matches!(self, StateType::Production | StateType::Transport)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StateType::Production => "Production",
            StateType::Transport  => "Transport",
            StateType::Breakdown  => "Breakdown",
            StateType::Setup      => "Setup",
            StateType::Charging   => "Charging",
            StateType::Dependency => "Dependency",
            StateType::Source     => "Source",
            StateType::Sink       => "Sink",
            StateType::Loading    => "Loading",
            StateType::Unloading  => "Unloading",
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateType {
    type Err = CoreError;

    /// Accepts `Production`, `ProductionState`, `production_state`, … and
    /// `ProcessBreakDownState` as an alias of `Breakdown`.
    fn from_str(s: &str) -> CoreResult<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let key = key.strip_suffix("state").unwrap_or(&key);
        match key {
            "production"                    => Ok(StateType::Production),
            "transport"                     => Ok(StateType::Transport),
            "breakdown" | "processbreakdown" => Ok(StateType::Breakdown),
            "setup"                         => Ok(StateType::Setup),
            "charging"                      => Ok(StateType::Charging),
            "dependency"                    => Ok(StateType::Dependency),
            "source"                        => Ok(StateType::Source),
            "sink"                          => Ok(StateType::Sink),
            "loading"                       => Ok(StateType::Loading),
            "unloading"                     => Ok(StateType::Unloading),
            _ => Err(CoreError::UnknownStateType(s.to_owned())),
        }
    }
}

// ── StateCategory ─────────────────────────────────────────────────────────────

/// Interface (source/sink) vs process state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateCategory {
    Interface,
    Process,
}

impl StateCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            StateCategory::Interface => "Interface State",
            StateCategory::Process   => "Process State",
        }
    }
}

impl fmt::Display for StateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

/// What happened at the event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activity {
    /// A product instance entered the system (at a source).
    Created,
    StartState,
    EndState,
    StartInterrupt,
    EndInterrupt,
    /// A product instance left the system (at a sink).
    Finished,
}

impl Activity {
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Created        => "created product",
            Activity::StartState     => "start state",
            Activity::EndState       => "end state",
            Activity::StartInterrupt => "start interrupt",
            Activity::EndInterrupt   => "end interrupt",
            Activity::Finished       => "finished product",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Activity {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let key = s.trim().replace('_', " ").to_ascii_lowercase();
        match key.as_str() {
            "created product" | "created"   => Ok(Activity::Created),
            "start state"                   => Ok(Activity::StartState),
            "end state"                     => Ok(Activity::EndState),
            "start interrupt"               => Ok(Activity::StartInterrupt),
            "end interrupt"                 => Ok(Activity::EndInterrupt),
            "finished product" | "finished" => Ok(Activity::Finished),
            _ => Err(CoreError::UnknownActivity(s.to_owned())),
        }
    }
}

// ── Event ─────────────────────────────────────────────────────────────────────

/// One row of the raw event log.
///
/// `expected_end_time`, `origin_location` and `target_location` are carried
/// through untouched; no analysis arithmetic reads them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Simulation clock in minutes.
    pub time:              f64,
    pub resource:          String,
    /// State id, e.g. `P1` or `BS1`.
    pub state:             String,
    pub state_type:        StateType,
    pub activity:          Activity,
    /// Product instance id; present on creation/finish and production rows.
    pub product:           Option<String>,
    pub expected_end_time: Option<f64>,
    pub origin_location:   Option<String>,
    pub target_location:   Option<String>,
}

impl Event {
    /// A bare event without product or location metadata.
    pub fn new(
        time:       f64,
        resource:   impl Into<String>,
        state:      impl Into<String>,
        state_type: StateType,
        activity:   Activity,
    ) -> Self {
        Self {
            time,
            resource: resource.into(),
            state: state.into(),
            state_type,
            activity,
            product: None,
            expected_end_time: None,
            origin_location: None,
            target_location: None,
        }
    }

    /// Attach a product instance id.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Attach the expected end time recorded by the simulation.
    pub fn with_expected_end(mut self, time: f64) -> Self {
        self.expected_end_time = Some(time);
        self
    }

    /// Attach origin/target locations (transport rows).
    pub fn with_locations(mut self, origin: impl Into<String>, target: impl Into<String>) -> Self {
        self.origin_location = Some(origin.into());
        self.target_location = Some(target.into());
        self
    }

    #[inline]
    pub fn category(&self) -> StateCategory {
        self.state_type.category()
    }

    /// Reject times that are negative, NaN or infinite.
    pub fn validate(&self) -> CoreResult<()> {
        if self.time.is_finite() && self.time >= 0.0 {
            Ok(())
        } else {
            Err(CoreError::InvalidTime {
                resource: self.resource.clone(),
                time:     self.time,
            })
        }
    }
}
