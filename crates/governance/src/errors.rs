//! Error types for the Governance module

use dca_types::{Address, Fee, SwapInterval};
use thiserror::Error;

/// Broad classification of a [`GovernanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller is not the governor
    Unauthorized,
    /// Argument outside the accepted domain (zero address, fee bound, zero interval)
    InvalidArgument,
    /// Argument conflicts with current state (duplicate or absent entry)
    Conflict,
}

/// Errors that can occur in the Governance module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    /// Caller is not the governor
    #[error("Governable: only governor (caller {caller})")]
    Unauthorized { caller: Address },

    /// A required address was the null identity
    #[error("zero address for {field}")]
    ZeroAddress { field: &'static str },

    /// Fee above the configured bound
    #[error("DCAFactory: fee too high ({fee} > {max})")]
    FeeTooHigh { fee: Fee, max: Fee },

    /// Interval of zero seconds
    #[error("DCAFactory: zero interval")]
    ZeroInterval,

    /// Interval is already on the allow list
    #[error("DCAFactory: allowed swap interval ({0})")]
    IntervalAlreadyAllowed(SwapInterval),

    /// Interval is not on the allow list
    #[error("DCAFactory: swap interval not allowed ({0})")]
    IntervalNotAllowed(SwapInterval),

    /// Pool factory has no tick spacing for this fee
    #[error("UniswapOracle: fee tier not enabled ({0})")]
    FeeTierNotEnabled(Fee),

    /// Fee tier already registered with the oracle
    #[error("UniswapOracle: fee tier already supported ({0})")]
    FeeTierAlreadySupported(Fee),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GovernanceError::Unauthorized { .. } => ErrorKind::Unauthorized,
            GovernanceError::ZeroAddress { .. }
            | GovernanceError::FeeTooHigh { .. }
            | GovernanceError::ZeroInterval
            | GovernanceError::FeeTierNotEnabled(_) => ErrorKind::InvalidArgument,
            GovernanceError::IntervalAlreadyAllowed(_)
            | GovernanceError::IntervalNotAllowed(_)
            | GovernanceError::FeeTierAlreadySupported(_) => ErrorKind::Conflict,
        }
    }
}

/// Result type for Governance operations
pub type Result<T> = std::result::Result<T, GovernanceError>;
