//! Governor-only access guard and address checks

use crate::errors::{GovernanceError, Result};
use dca_types::Address;
use tracing::warn;

/// A component whose mutations are restricted to a single governor.
///
/// The governor is fixed at construction; there is no transfer operation.
pub trait Governed {
    fn governor(&self) -> Address;

    fn is_governor(&self, who: &Address) -> bool {
        self.governor() == *who
    }
}

/// Fail with `Unauthorized` unless `caller` is the governor
pub fn ensure_governor(governor: &Address, caller: &Address) -> Result<()> {
    if governor != caller {
        warn!(target: "governance", %caller, "Rejected call from non-governor");
        return Err(GovernanceError::Unauthorized { caller: *caller });
    }
    Ok(())
}

/// Fail with `ZeroAddress` when `address` is the null identity
pub fn ensure_non_zero(address: &Address, field: &'static str) -> Result<()> {
    if address.is_zero() {
        return Err(GovernanceError::ZeroAddress { field });
    }
    Ok(())
}
