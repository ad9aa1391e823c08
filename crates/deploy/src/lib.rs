//! Deployment orchestration for DCA parameter governance
//!
//! Mirrors the on-chain setup sequence against in-memory components and
//! reports the resulting state and emitted events.

pub mod config;
pub mod deployment;

pub use config::{load_config, DeployConfig, DeployOverrides};
pub use deployment::{deploy, Deployment, DeploymentReport, DeploymentStep};
