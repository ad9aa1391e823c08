//! Per-pair protocol parameters: fee recipient, token pair and swap router.

use crate::access::{ensure_governor, ensure_non_zero, Governed};
use crate::errors::Result;
use crate::events::{EventLog, GovernanceEvent};
use dca_types::Address;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Addresses a pair is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolAddresses {
    pub fee_recipient: Address,
    /// Token being sold
    pub from: Address,
    /// Token being bought
    pub to: Address,
    /// Swap router
    pub uniswap: Address,
}

/// Which address a setter targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressField {
    FeeRecipient,
    From,
    To,
    Uniswap,
}

impl AddressField {
    const ALL: [AddressField; 4] = [
        AddressField::FeeRecipient,
        AddressField::From,
        AddressField::To,
        AddressField::Uniswap,
    ];

    fn name(self) -> &'static str {
        match self {
            AddressField::FeeRecipient => "fee_recipient",
            AddressField::From => "from",
            AddressField::To => "to",
            AddressField::Uniswap => "uniswap",
        }
    }

    fn event(self, value: Address) -> GovernanceEvent {
        match self {
            AddressField::FeeRecipient => GovernanceEvent::FeeRecipientSet(value),
            AddressField::From => GovernanceEvent::FromSet(value),
            AddressField::To => GovernanceEvent::ToSet(value),
            AddressField::Uniswap => GovernanceEvent::UniswapSet(value),
        }
    }

    fn get(self, addresses: &ProtocolAddresses) -> Address {
        match self {
            AddressField::FeeRecipient => addresses.fee_recipient,
            AddressField::From => addresses.from,
            AddressField::To => addresses.to,
            AddressField::Uniswap => addresses.uniswap,
        }
    }

    fn slot(self, addresses: &mut ProtocolAddresses) -> &mut Address {
        match self {
            AddressField::FeeRecipient => &mut addresses.fee_recipient,
            AddressField::From => &mut addresses.from,
            AddressField::To => &mut addresses.to,
            AddressField::Uniswap => &mut addresses.uniswap,
        }
    }
}

#[derive(Debug)]
struct ProtocolState {
    addresses: ProtocolAddresses,
    events: EventLog,
}

/// Governor-controlled addresses of a DCA pair
#[derive(Debug)]
pub struct ProtocolParameters {
    governor: Address,
    state: RwLock<ProtocolState>,
}

impl ProtocolParameters {
    /// Every address must be non-zero. Emits one `*Set` event per field.
    pub fn new(governor: Address, addresses: ProtocolAddresses) -> Result<Self> {
        ensure_non_zero(&governor, "governor")?;
        for field in AddressField::ALL {
            ensure_non_zero(&field.get(&addresses), field.name())?;
        }

        let mut events = EventLog::new();
        for field in AddressField::ALL {
            events.emit(field.event(field.get(&addresses)));
        }

        info!(
            target: "governance",
            %governor,
            from = %addresses.from,
            to = %addresses.to,
            "Protocol parameters initialized"
        );

        Ok(Self {
            governor,
            state: RwLock::new(ProtocolState { addresses, events }),
        })
    }

    pub fn addresses(&self) -> ProtocolAddresses {
        self.state.read().addresses
    }

    pub fn fee_recipient(&self) -> Address {
        self.state.read().addresses.fee_recipient
    }

    pub fn from(&self) -> Address {
        self.state.read().addresses.from
    }

    pub fn to(&self) -> Address {
        self.state.read().addresses.to
    }

    pub fn uniswap(&self) -> Address {
        self.state.read().addresses.uniswap
    }

    pub fn set_fee_recipient(&self, caller: &Address, value: Address) -> Result<()> {
        self.set_address(caller, AddressField::FeeRecipient, value)
    }

    pub fn set_from(&self, caller: &Address, value: Address) -> Result<()> {
        self.set_address(caller, AddressField::From, value)
    }

    pub fn set_to(&self, caller: &Address, value: Address) -> Result<()> {
        self.set_address(caller, AddressField::To, value)
    }

    pub fn set_uniswap(&self, caller: &Address, value: Address) -> Result<()> {
        self.set_address(caller, AddressField::Uniswap, value)
    }

    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.state.read().events.entries().to_vec()
    }

    pub fn take_events(&self) -> Vec<GovernanceEvent> {
        self.state.write().events.take()
    }

    fn set_address(&self, caller: &Address, field: AddressField, value: Address) -> Result<()> {
        ensure_governor(&self.governor, caller)?;
        ensure_non_zero(&value, field.name())?;

        let mut state = self.state.write();
        *field.slot(&mut state.addresses) = value;
        state.events.emit(field.event(value));
        Ok(())
    }
}

impl Governed for ProtocolParameters {
    fn governor(&self) -> Address {
        self.governor
    }
}
