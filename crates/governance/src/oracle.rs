//! Uniswap V3 oracle fee-tier registry
//!
//! The oracle only quotes from pools whose fee tier the governor has
//! registered. A tier can be registered once, and only if the pool factory
//! has it enabled (non-zero tick spacing).

use crate::access::{ensure_governor, ensure_non_zero, Governed};
use crate::errors::{GovernanceError, Result};
use crate::events::{EventLog, GovernanceEvent};
use dca_types::{Address, Fee};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Canonical Uniswap V3 factory on mainnet (`0x1F98431c8aD98523631AE4a59f267346ea31F984`)
pub const UNISWAP_V3_FACTORY_ADDRESS: Address = Address([
    0x1f, 0x98, 0x43, 0x1c, 0x8a, 0xd9, 0x85, 0x23, 0x63, 0x1a, 0xe4, 0xa5, 0x9f, 0x26, 0x73, 0x46,
    0xea, 0x31, 0xf9, 0x84,
]);

/// Fee tiers registered at deployment, in hundredths of a bip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum FeeTier {
    Low = 500,
    Medium = 3000,
    High = 10000,
}

impl FeeTier {
    pub const ALL: [FeeTier; 3] = [FeeTier::Low, FeeTier::Medium, FeeTier::High];

    pub const fn fee(self) -> Fee {
        self as Fee
    }
}

impl From<FeeTier> for Fee {
    fn from(tier: FeeTier) -> Self {
        tier.fee()
    }
}

/// Source of truth for which fee tiers a pool factory has enabled
pub trait PoolFactory: fmt::Debug + Send + Sync {
    /// Tick spacing for `fee`, or 0 when the tier is not enabled
    fn fee_amount_tick_spacing(&self, fee: Fee) -> i32;
}

/// Fee tiers enabled on the canonical Uniswap V3 factory
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownUniswapV3Tiers;

impl PoolFactory for KnownUniswapV3Tiers {
    fn fee_amount_tick_spacing(&self, fee: Fee) -> i32 {
        match fee {
            100 => 1,
            500 => 10,
            3000 => 60,
            10000 => 200,
            _ => 0,
        }
    }
}

#[derive(Debug, Default)]
struct OracleState {
    supported_fee_tiers: Vec<Fee>,
    events: EventLog,
}

/// Point-in-time view of the oracle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSnapshot {
    pub governor: Address,
    pub factory: Address,
    pub supported_fee_tiers: Vec<Fee>,
}

/// Governor-controlled Uniswap V3 TWAP oracle configuration
#[derive(Debug)]
pub struct UniswapOracle {
    governor: Address,
    factory: Address,
    pool_factory: Arc<dyn PoolFactory>,
    state: RwLock<OracleState>,
}

impl UniswapOracle {
    pub fn new(
        governor: Address,
        factory: Address,
        pool_factory: Arc<dyn PoolFactory>,
    ) -> Result<Self> {
        ensure_non_zero(&governor, "governor")?;
        ensure_non_zero(&factory, "factory")?;

        info!(target: "oracle", %governor, %factory, "Uniswap oracle deployed");

        Ok(Self {
            governor,
            factory,
            pool_factory,
            state: RwLock::new(OracleState::default()),
        })
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    /// Register `fee` as a tier the oracle may quote from
    pub fn add_fee_tier(&self, caller: &Address, fee: Fee) -> Result<()> {
        ensure_governor(&self.governor, caller)?;
        if self.pool_factory.fee_amount_tick_spacing(fee) <= 0 {
            return Err(GovernanceError::FeeTierNotEnabled(fee));
        }

        let mut state = self.state.write();
        if state.supported_fee_tiers.contains(&fee) {
            return Err(GovernanceError::FeeTierAlreadySupported(fee));
        }
        state.supported_fee_tiers.push(fee);
        state.events.emit(GovernanceEvent::AddedFeeTier(fee));

        info!(target: "oracle", fee, "Fee tier added");
        Ok(())
    }

    /// Registered tiers in registration order
    pub fn supported_fee_tiers(&self) -> Vec<Fee> {
        self.state.read().supported_fee_tiers.clone()
    }

    pub fn is_fee_tier_supported(&self, fee: Fee) -> bool {
        let supported = self.state.read().supported_fee_tiers.contains(&fee);
        debug!(target: "oracle", fee, supported, "Fee tier lookup");
        supported
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.state.read().events.entries().to_vec()
    }

    pub fn take_events(&self) -> Vec<GovernanceEvent> {
        self.state.write().events.take()
    }

    pub fn snapshot(&self) -> OracleSnapshot {
        OracleSnapshot {
            governor: self.governor,
            factory: self.factory,
            supported_fee_tiers: self.supported_fee_tiers(),
        }
    }
}

impl Governed for UniswapOracle {
    fn governor(&self) -> Address {
        self.governor
    }
}
