//! Semantic time categories a resource's lifetime is partitioned into.

use std::fmt;

/// Mutually exclusive resource time category.
///
/// Variant order is the report order: every per-resource breakdown lists
/// categories as `SB, PR, UD, ST, CR, DP`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeType {
    /// Idle and available.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "SB"))]
    Standby,
    /// At least one capacity slot executing a process.
    #[cfg_attr(feature = "serde", serde(rename = "PR"))]
    Productive,
    /// Broken down.
    #[cfg_attr(feature = "serde", serde(rename = "UD"))]
    UnscheduledDowntime,
    #[cfg_attr(feature = "serde", serde(rename = "ST"))]
    Setup,
    #[cfg_attr(feature = "serde", serde(rename = "CR"))]
    Charging,
    /// Waiting on an auxiliary resource or other precondition.
    #[cfg_attr(feature = "serde", serde(rename = "DP"))]
    Dependency,
}

impl TimeType {
    pub const ALL: [TimeType; 6] = [
        TimeType::Standby,
        TimeType::Productive,
        TimeType::UnscheduledDowntime,
        TimeType::Setup,
        TimeType::Charging,
        TimeType::Dependency,
    ];

    /// Two-letter code used in tables and reports.
    pub fn code(self) -> &'static str {
        match self {
            TimeType::Standby             => "SB",
            TimeType::Productive          => "PR",
            TimeType::UnscheduledDowntime => "UD",
            TimeType::Setup               => "ST",
            TimeType::Charging            => "CR",
            TimeType::Dependency          => "DP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeType::Standby             => "Standby",
            TimeType::Productive          => "Productive",
            TimeType::UnscheduledDowntime => "Unscheduled Downtime",
            TimeType::Setup               => "Setup",
            TimeType::Charging            => "Charging",
            TimeType::Dependency          => "Dependency",
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
