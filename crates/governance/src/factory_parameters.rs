//! DCA factory parameters
//!
//! Holds the protocol fee, its recipient and the allow list of swap intervals
//! that pairs created by the factory may use. All mutations are governor-only
//! and either commit completely or leave state untouched.

use crate::access::{ensure_governor, ensure_non_zero, Governed};
use crate::errors::{GovernanceError, Result};
use crate::events::{EventLog, GovernanceEvent};
use dca_types::{Address, Fee, SwapInterval};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Fee denominator: a fee of `FEE_PRECISION` is 1%
pub const FEE_PRECISION: Fee = 10_000;

/// Upper bound for the protocol fee (10%)
pub const MAX_FEE: Fee = 10 * FEE_PRECISION;

/// Fee a freshly created factory starts with (0.3%)
pub const DEFAULT_FEE: Fee = 3_000;

/// Ordered set of allowed swap intervals.
///
/// Iteration follows insertion order of the members still present.
#[derive(Debug, Clone, Default)]
struct IntervalAllowList {
    order: Vec<SwapInterval>,
    members: HashSet<SwapInterval>,
}

impl IntervalAllowList {
    fn contains(&self, interval: SwapInterval) -> bool {
        self.members.contains(&interval)
    }

    fn to_vec(&self) -> Vec<SwapInterval> {
        self.order.clone()
    }

    /// Check a batch for insertion without mutating
    fn validate_additions(&self, intervals: &[SwapInterval]) -> Result<()> {
        let mut batch = HashSet::with_capacity(intervals.len());
        for &interval in intervals {
            if interval == 0 {
                return Err(GovernanceError::ZeroInterval);
            }
            // a repeat inside the batch would already be allowed by the time it is reached
            if self.contains(interval) || !batch.insert(interval) {
                return Err(GovernanceError::IntervalAlreadyAllowed(interval));
            }
        }
        Ok(())
    }

    /// Check a batch for removal without mutating
    fn validate_removals(&self, intervals: &[SwapInterval]) -> Result<()> {
        let mut batch = HashSet::with_capacity(intervals.len());
        for &interval in intervals {
            if !self.contains(interval) || !batch.insert(interval) {
                return Err(GovernanceError::IntervalNotAllowed(interval));
            }
        }
        Ok(())
    }

    fn insert_all(&mut self, intervals: &[SwapInterval]) {
        for &interval in intervals {
            if self.members.insert(interval) {
                self.order.push(interval);
            }
        }
    }

    fn remove_all(&mut self, intervals: &[SwapInterval]) {
        for interval in intervals {
            self.members.remove(interval);
        }
        let members = &self.members;
        self.order.retain(|interval| members.contains(interval));
    }
}

#[derive(Debug)]
struct FactoryState {
    fee_recipient: Address,
    fee: Fee,
    allowed_intervals: IntervalAllowList,
    events: EventLog,
}

/// Point-in-time view of the factory parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorySnapshot {
    pub governor: Address,
    pub fee_recipient: Address,
    pub fee: Fee,
    pub max_fee: Fee,
    pub fee_precision: Fee,
    pub allowed_swap_intervals: Vec<SwapInterval>,
}

/// Governor-controlled parameters of the DCA factory
#[derive(Debug)]
pub struct FactoryParameters {
    governor: Address,
    state: RwLock<FactoryState>,
}

impl FactoryParameters {
    /// Create the parameters with `governor` as the only identity allowed to
    /// mutate them. Emits `FeeRecipientSet` for the initial recipient.
    pub fn new(governor: Address, fee_recipient: Address) -> Result<Self> {
        ensure_non_zero(&governor, "governor")?;
        ensure_non_zero(&fee_recipient, "fee_recipient")?;

        let mut events = EventLog::new();
        events.emit(GovernanceEvent::FeeRecipientSet(fee_recipient));

        info!(
            target: "governance",
            %governor,
            %fee_recipient,
            fee = DEFAULT_FEE,
            "Factory parameters initialized"
        );

        Ok(Self {
            governor,
            state: RwLock::new(FactoryState {
                fee_recipient,
                fee: DEFAULT_FEE,
                allowed_intervals: IntervalAllowList::default(),
                events,
            }),
        })
    }

    pub fn fee_recipient(&self) -> Address {
        self.state.read().fee_recipient
    }

    pub fn fee(&self) -> Fee {
        self.state.read().fee
    }

    /// Replace the fee recipient
    pub fn set_fee_recipient(&self, caller: &Address, fee_recipient: Address) -> Result<()> {
        ensure_governor(&self.governor, caller)?;
        ensure_non_zero(&fee_recipient, "fee_recipient")?;

        let mut state = self.state.write();
        state.fee_recipient = fee_recipient;
        state.events.emit(GovernanceEvent::FeeRecipientSet(fee_recipient));
        Ok(())
    }

    /// Replace the protocol fee. `MAX_FEE` itself is accepted.
    pub fn set_fee(&self, caller: &Address, fee: Fee) -> Result<()> {
        ensure_governor(&self.governor, caller)?;
        if fee > MAX_FEE {
            return Err(GovernanceError::FeeTooHigh { fee, max: MAX_FEE });
        }

        let mut state = self.state.write();
        state.fee = fee;
        state.events.emit(GovernanceEvent::FeeSet(fee));
        Ok(())
    }

    /// Allow every interval in `intervals`, or none of them.
    ///
    /// Fails with `ZeroInterval` or `IntervalAlreadyAllowed` for the first
    /// offending element, checked in caller order.
    pub fn add_swap_intervals(&self, caller: &Address, intervals: &[SwapInterval]) -> Result<()> {
        ensure_governor(&self.governor, caller)?;

        let mut state = self.state.write();
        state.allowed_intervals.validate_additions(intervals)?;
        state.allowed_intervals.insert_all(intervals);
        state
            .events
            .emit(GovernanceEvent::SwapIntervalsAllowed(intervals.to_vec()));
        Ok(())
    }

    /// Forbid every interval in `intervals`, or none of them.
    pub fn remove_swap_intervals(
        &self,
        caller: &Address,
        intervals: &[SwapInterval],
    ) -> Result<()> {
        ensure_governor(&self.governor, caller)?;

        let mut state = self.state.write();
        state.allowed_intervals.validate_removals(intervals)?;
        state.allowed_intervals.remove_all(intervals);
        state
            .events
            .emit(GovernanceEvent::SwapIntervalsForbidden(intervals.to_vec()));
        Ok(())
    }

    pub fn is_swap_interval_allowed(&self, interval: SwapInterval) -> bool {
        let allowed = self.state.read().allowed_intervals.contains(interval);
        debug!(target: "governance", interval, allowed, "Swap interval lookup");
        allowed
    }

    /// Allowed intervals in insertion order; empty when none are allowed
    pub fn allowed_swap_intervals(&self) -> Vec<SwapInterval> {
        self.state.read().allowed_intervals.to_vec()
    }

    /// Copy of every event emitted so far
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.state.read().events.entries().to_vec()
    }

    /// Drain the event log
    pub fn take_events(&self) -> Vec<GovernanceEvent> {
        self.state.write().events.take()
    }

    pub fn snapshot(&self) -> FactorySnapshot {
        let state = self.state.read();
        FactorySnapshot {
            governor: self.governor,
            fee_recipient: state.fee_recipient,
            fee: state.fee,
            max_fee: MAX_FEE,
            fee_precision: FEE_PRECISION,
            allowed_swap_intervals: state.allowed_intervals.to_vec(),
        }
    }
}

impl Governed for FactoryParameters {
    fn governor(&self) -> Address {
        self.governor
    }
}
