//! Type-safe domain types for the load planning engine
//!
//! This module replaces stringly-typed planning values with proper Rust enums
//! that provide compile-time validation and exhaustive matching.

// Library API - consumed by the host console; not every entry point
// is exercised by the headless binary
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

/// Consignment priority class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[strum(serialize = "high")]
    High,
    #[default]
    #[strum(serialize = "medium")]
    Medium,
    #[strum(serialize = "low")]
    Low,
}

/// Cargo fragility class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Fragility {
    #[strum(serialize = "fragile")]
    Fragile,
    #[default]
    #[strum(serialize = "standard")]
    Standard,
    #[strum(serialize = "heavy")]
    Heavy,
}

/// Delivery position class within the trailer.
///
/// Tail is first-off, bulkhead is last-off (loaded against the headboard),
/// everything between is middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPosition {
    #[strum(serialize = "tail")]
    Tail,
    #[default]
    #[strum(serialize = "middle")]
    Middle,
    #[strum(serialize = "bulkhead")]
    Bulkhead,
}

impl DeliveryPosition {
    /// Classify a delivery by its rank in the unload order.
    ///
    /// `rank` is zero-based among `count` deliveries sorted by sequence.
    /// The first drop is tail, the last is bulkhead (for two or more
    /// deliveries); a sole delivery is tail; there is no last-off
    /// distinct from first-off on a one-drop run.
    pub fn classify(rank: usize, count: usize) -> Self {
        if rank == 0 {
            Self::Tail
        } else if rank + 1 == count {
            Self::Bulkhead
        } else {
            Self::Middle
        }
    }
}

/// Delivery lifecycle status.
///
/// A linear, non-branching progression; failed/cancelled outcomes live in
/// the external job-tracking collaborator, not at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[default]
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "in_progress")]
    InProgress,
    #[strum(serialize = "completed")]
    Completed,
}

impl DeliveryStatus {
    /// Returns true if this is the terminal state
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if `target` is a valid transition from this status.
    ///
    /// Allowed: pending → in_progress, in_progress → completed, and the
    /// direct pending → completed (a driver may mark an unstarted job
    /// complete in the field). Nothing leaves completed.
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress)
                | (Self::Pending, Self::Completed)
                | (Self::InProgress, Self::Completed)
        )
    }
}

/// Consignment placement-acceptance state.
///
/// Orthogonal to [`DeliveryStatus`]: accepting or rejecting a placement
/// never alters the delivery sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConsignmentState {
    #[default]
    #[strum(serialize = "allocated")]
    Allocated,
    #[strum(serialize = "rejected")]
    Rejected,
    #[strum(serialize = "modified")]
    Modified,
}

/// Caller capability for role-gated operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(serialize = "admin")]
    Admin,
    #[default]
    #[strum(serialize = "driver")]
    Driver,
}

impl Role {
    /// Returns true if this role may run planning operations
    /// (allocate, optimize, save plans, reposition cargo)
    #[inline]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Error returned when parsing a time-of-day string fails
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid time '{input}' (expected HH:MM)")]
pub struct TimeParseError {
    pub input: String,
}

/// A wall-clock time of day, minute resolution.
///
/// Serialized as the "HH:MM" string the job source supplies. Ordering is
/// chronological, so estimated delivery times sort directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Construct from hours and minutes. Returns None out of range.
    pub fn new(hours: u16, minutes: u16) -> Option<Self> {
        if hours < 24 && minutes < 60 {
            Some(Self {
                minutes: hours * 60 + minutes,
            })
        } else {
            None
        }
    }

    /// Minutes since midnight (0..1440)
    #[inline]
    pub const fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || TimeParseError {
            input: s.to_string(),
        };
        let (hh, mm) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u16 = hh.parse().map_err(|_| invalid())?;
        let minutes: u16 = mm.parse().map_err(|_| invalid())?;
        Self::new(hours, minutes).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_status_serialization() {
        assert_eq!(DeliveryStatus::Pending.to_string(), "pending");
        assert_eq!(DeliveryStatus::InProgress.to_string(), "in_progress");
        assert_eq!(DeliveryStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            DeliveryStatus::from_str("in_progress").unwrap(),
            DeliveryStatus::InProgress
        );
        assert!(DeliveryStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_status_transitions() {
        use DeliveryStatus::*;
        assert!(Pending.can_transition_to(InProgress));
        assert!(Pending.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Completed));

        // Nothing leaves completed, nothing goes backwards
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Pending));

        // Same-state is not a transition
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_position_classify() {
        assert_eq!(DeliveryPosition::classify(0, 3), DeliveryPosition::Tail);
        assert_eq!(DeliveryPosition::classify(1, 3), DeliveryPosition::Middle);
        assert_eq!(DeliveryPosition::classify(2, 3), DeliveryPosition::Bulkhead);

        assert_eq!(DeliveryPosition::classify(0, 2), DeliveryPosition::Tail);
        assert_eq!(DeliveryPosition::classify(1, 2), DeliveryPosition::Bulkhead);

        // A sole delivery is tail by policy
        assert_eq!(DeliveryPosition::classify(0, 1), DeliveryPosition::Tail);
    }

    #[test]
    fn test_priority_iteration() {
        let priorities: Vec<String> = Priority::iter().map(|p| p.to_string()).collect();
        assert_eq!(priorities, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_role_privileges() {
        assert!(Role::Admin.is_privileged());
        assert!(!Role::Driver.is_privileged());
    }

    #[test]
    fn test_time_of_day_parsing() {
        let t: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(t.minutes_since_midnight(), 570);
        assert_eq!(t.to_string(), "09:30");

        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("9".parse::<TimeOfDay>().is_err());
        assert!("ab:cd".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_time_of_day_ordering() {
        let nine: TimeOfDay = "09:00".parse().unwrap();
        let noon: TimeOfDay = "12:00".parse().unwrap();
        assert!(nine < noon);
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = DeliveryStatus::InProgress;
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: DeliveryStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(original, parsed);

        let time: TimeOfDay = "07:45".parse().unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"07:45\"");
        let parsed: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(time, parsed);
    }

    #[test]
    fn test_all_enums_have_default() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Fragility::default(), Fragility::Standard);
        assert_eq!(DeliveryPosition::default(), DeliveryPosition::Middle);
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::Pending);
        assert_eq!(ConsignmentState::default(), ConsignmentState::Allocated);
        assert_eq!(Role::default(), Role::Driver);
    }
}
