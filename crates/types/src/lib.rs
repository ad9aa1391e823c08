pub mod address;

pub use address::*;

/// Swap interval length in seconds.
pub type SwapInterval = u32;

/// Fee expressed in units of `1 / FEE_PRECISION` percent.
pub type Fee = u32;
