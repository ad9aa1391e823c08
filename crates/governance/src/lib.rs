//! DCA Parameter Governance
//!
//! Governor-controlled parameters for the DCA swap protocol:
//! - Factory fee, fee recipient and swap-interval allow list
//! - Per-pair protocol addresses (fee recipient, tokens, router)
//! - Uniswap V3 oracle fee tiers
//!
//! Every mutation is restricted to the governor fixed at construction, is
//! atomic, and records exactly one event when it commits.

pub mod access;
pub mod errors;
pub mod events;
pub mod factory_parameters;
pub mod oracle;
pub mod protocol_parameters;

pub use access::*;
pub use errors::*;
pub use events::*;
pub use factory_parameters::*;
pub use oracle::*;
pub use protocol_parameters::*;

/// Governance module version (for API introspection)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
