//! Deployment sequence
//!
//! Instantiates the factory parameters and the Uniswap oracle, then issues
//! the governor's setup calls: optional fee, allowed swap intervals and one
//! `add_fee_tier` per configured tier.

use crate::config::DeployConfig;
use anyhow::{Context, Result};
use dca_governance::{
    FactoryParameters, FactorySnapshot, GovernanceEvent, Governed, KnownUniswapV3Tiers,
    OracleSnapshot, UniswapOracle,
};
use dca_types::Address;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub const FACTORY_CONTRACT: &str = "DCAFactory";
pub const ORACLE_CONTRACT: &str = "UniswapOracle";

/// One call issued during deployment and the events it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentStep {
    pub contract: String,
    pub action: String,
    pub from: Address,
    pub events: Vec<GovernanceEvent>,
}

/// Final state plus the ordered call log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub deployer: Address,
    pub factory: FactorySnapshot,
    pub oracle: OracleSnapshot,
    pub steps: Vec<DeploymentStep>,
}

/// Live components produced by a deployment
#[derive(Debug)]
pub struct Deployment {
    pub factory: FactoryParameters,
    pub oracle: UniswapOracle,
    steps: Vec<DeploymentStep>,
    deployer: Address,
}

impl Deployment {
    pub fn steps(&self) -> &[DeploymentStep] {
        &self.steps
    }

    pub fn report(&self) -> DeploymentReport {
        DeploymentReport {
            deployer: self.deployer,
            factory: self.factory.snapshot(),
            oracle: self.oracle.snapshot(),
            steps: self.steps.clone(),
        }
    }
}

fn step(contract: &str, action: &str, from: Address, events: Vec<GovernanceEvent>) -> DeploymentStep {
    info!(
        target: "deploy",
        contract,
        action,
        %from,
        events = events.len(),
        "Executed"
    );
    DeploymentStep {
        contract: contract.to_string(),
        action: action.to_string(),
        from,
        events,
    }
}

/// Run the full deployment sequence described by `config`
pub fn deploy(config: &DeployConfig) -> Result<Deployment> {
    let deployer = config.deployer();
    let governor = config.governor;
    let mut steps = Vec::new();

    let factory = FactoryParameters::new(governor, config.fee_recipient)
        .context("Failed to deploy factory parameters")?;
    steps.push(step(FACTORY_CONTRACT, "deploy", deployer, factory.take_events()));

    if let Some(fee) = config.fee {
        factory
            .set_fee(&governor, fee)
            .with_context(|| format!("Failed to set fee {fee}"))?;
        steps.push(step(FACTORY_CONTRACT, "setFee", governor, factory.take_events()));
    }

    if !config.swap_intervals.is_empty() {
        factory
            .add_swap_intervals(&governor, &config.swap_intervals)
            .with_context(|| format!("Failed to allow swap intervals {:?}", config.swap_intervals))?;
        steps.push(step(
            FACTORY_CONTRACT,
            "addSwapIntervalsToAllowedList",
            governor,
            factory.take_events(),
        ));
    }

    let oracle = UniswapOracle::new(governor, config.uniswap_v3_factory, Arc::new(KnownUniswapV3Tiers))
        .context("Failed to deploy Uniswap oracle")?;
    steps.push(step(ORACLE_CONTRACT, "deploy", deployer, oracle.take_events()));

    for &fee in &config.fee_tiers {
        oracle
            .add_fee_tier(&governor, fee)
            .with_context(|| format!("Failed to add fee tier {fee}"))?;
        steps.push(step(ORACLE_CONTRACT, "addFeeTier", governor, oracle.take_events()));
    }

    info!(
        target: "deploy",
        %governor,
        deployer_is_governor = factory.is_governor(&deployer),
        fee_tiers = ?oracle.supported_fee_tiers(),
        swap_intervals = ?factory.allowed_swap_intervals(),
        "Deployment complete"
    );

    Ok(Deployment {
        factory,
        oracle,
        steps,
        deployer,
    })
}
