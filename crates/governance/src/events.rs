//! Notifications emitted by successful governance calls.
//!
//! Every mutating call that commits appends exactly one event to the owning
//! component's [`EventLog`]. Rejected calls never emit.

use dca_types::{Address, Fee, SwapInterval};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A single governance notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "args")]
pub enum GovernanceEvent {
    FeeRecipientSet(Address),
    FeeSet(Fee),
    /// Intervals in the order the caller supplied them
    SwapIntervalsAllowed(Vec<SwapInterval>),
    SwapIntervalsForbidden(Vec<SwapInterval>),
    FromSet(Address),
    ToSet(Address),
    UniswapSet(Address),
    AddedFeeTier(Fee),
}

impl GovernanceEvent {
    /// Event name as it appears in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            GovernanceEvent::FeeRecipientSet(_) => "FeeRecipientSet",
            GovernanceEvent::FeeSet(_) => "FeeSet",
            GovernanceEvent::SwapIntervalsAllowed(_) => "SwapIntervalsAllowed",
            GovernanceEvent::SwapIntervalsForbidden(_) => "SwapIntervalsForbidden",
            GovernanceEvent::FromSet(_) => "FromSet",
            GovernanceEvent::ToSet(_) => "ToSet",
            GovernanceEvent::UniswapSet(_) => "UniswapSet",
            GovernanceEvent::AddedFeeTier(_) => "AddedFeeTier",
        }
    }
}

/// Append-only event log owned by a governed component
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<GovernanceEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and mirror it to the tracing subscriber
    pub fn emit(&mut self, event: GovernanceEvent) {
        info!(target: "governance", event = event.name(), args = ?event, "Event emitted");
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[GovernanceEvent] {
        &self.entries
    }

    pub fn last(&self) -> Option<&GovernanceEvent> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain all recorded events, oldest first
    pub fn take(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.entries)
    }
}
