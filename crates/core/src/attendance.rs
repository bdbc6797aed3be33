//! Clock-in/clock-out state machine.
//!
//! Per user there are two states: [`SessionState::Closed`] (no open record)
//! and [`SessionState::Open`] (at least one record without a clock-out).
//! [`plan_transition`] decides what an event does in a given state; the
//! caller performs the resulting store write.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Event type
// ---------------------------------------------------------------------------

/// Wire token for a clock-in event.
pub const EVENT_IN: &str = "IN";
/// Wire token for a clock-out event.
pub const EVENT_OUT: &str = "OUT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    In,
    Out,
}

impl EventType {
    /// Parse a wire token. Matching is exact and case-sensitive.
    ///
    /// Under [`UnknownEventPolicy::TreatAsOut`] every token other than `IN`
    /// is a clock-out.
    pub fn from_token(token: &str, policy: UnknownEventPolicy) -> Result<Self, CoreError> {
        match token {
            EVENT_IN => Ok(Self::In),
            EVENT_OUT => Ok(Self::Out),
            other => match policy {
                UnknownEventPolicy::TreatAsOut => Ok(Self::Out),
                UnknownEventPolicy::Reject => Err(CoreError::Validation(format!(
                    "Unknown event type '{other}'. Must be one of: {EVENT_IN}, {EVENT_OUT}"
                ))),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// What a clock-in does while the user already has an open session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReentryPolicy {
    /// Open an additional session alongside the existing one.
    #[default]
    Allow,
    /// Refuse the clock-in with a conflict.
    Reject,
}

impl FromStr for ReentryPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid re-entry policy '{other}'. Must be one of: allow, reject"
            ))),
        }
    }
}

/// How event tokens other than `IN`/`OUT` are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownEventPolicy {
    /// Anything that is not `IN` clocks out.
    #[default]
    TreatAsOut,
    /// Unknown tokens are a validation error.
    Reject,
}

impl FromStr for UnknownEventPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "out" => Ok(Self::TreatAsOut),
            "reject" => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid unknown-event policy '{other}'. Must be one of: out, reject"
            ))),
        }
    }
}

/// Both session policies together. The default is the permissive behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    pub reentry: ReentryPolicy,
    pub unknown_event: UnknownEventPolicy,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    /// `open_sessions` is at least 1. More than one only happens when
    /// re-entry is allowed (or under concurrent clock-ins).
    Open { open_sessions: usize },
}

impl SessionState {
    pub fn from_open_count(open_sessions: usize) -> Self {
        if open_sessions == 0 {
            Self::Closed
        } else {
            Self::Open { open_sessions }
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// The store mutation an event calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Insert a new record with no clock-out.
    Open,
    /// Insert another open record while one already exists.
    OpenAdditional,
    /// Set clock-out on every open record of the user.
    Close,
    /// Clock-out with nothing open. Succeeds without writing.
    Noop,
}

/// Decide the transition for `event` in `state`.
pub fn plan_transition(
    state: SessionState,
    event: EventType,
    reentry: ReentryPolicy,
) -> Result<Transition, CoreError> {
    match (state, event) {
        (SessionState::Closed, EventType::In) => Ok(Transition::Open),
        (SessionState::Open { .. }, EventType::In) => match reentry {
            ReentryPolicy::Allow => Ok(Transition::OpenAdditional),
            ReentryPolicy::Reject => Err(CoreError::Conflict(
                "An open attendance session already exists".into(),
            )),
        },
        (SessionState::Open { .. }, EventType::Out) => Ok(Transition::Close),
        (SessionState::Closed, EventType::Out) => Ok(Transition::Noop),
    }
}

/// Confirmation text returned to the caller after a successful event.
pub fn confirmation_message(site_name: &str) -> String {
    format!("Registered at: {site_name}")
}
