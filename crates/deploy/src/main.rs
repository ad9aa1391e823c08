//! DCA deployment command line interface

use anyhow::{Context, Result};
use clap::Parser;
use dca_deploy::config::default_config_path;
use dca_deploy::{deploy, load_config, DeployConfig, DeployOverrides};
use dca_types::{Address, Fee, SwapInterval};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dca-deploy")]
#[command(about = "Deploy DCA factory parameters and the Uniswap oracle", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./deploy.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Identity instantiating the components (defaults to the governor)
    #[arg(long)]
    deployer: Option<Address>,
    /// Governor address
    #[arg(long)]
    governor: Option<Address>,
    /// Fee recipient address
    #[arg(long)]
    fee_recipient: Option<Address>,
    /// Uniswap V3 factory address
    #[arg(long)]
    uniswap_v3_factory: Option<Address>,
    /// Protocol fee to set after deployment
    #[arg(long)]
    fee: Option<Fee>,
    /// Oracle fee tiers, comma separated
    #[arg(long, value_delimiter = ',')]
    fee_tiers: Vec<Fee>,
    /// Swap intervals to allow, comma separated
    #[arg(long, value_delimiter = ',')]
    swap_intervals: Vec<SwapInterval>,
    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
    /// Write the JSON report here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn overrides(&self) -> DeployOverrides {
        DeployOverrides {
            deployer: self.deployer,
            governor: self.governor,
            fee_recipient: self.fee_recipient,
            uniswap_v3_factory: self.uniswap_v3_factory,
            fee: self.fee,
            fee_tiers: self.fee_tiers.clone(),
            swap_intervals: self.swap_intervals.clone(),
            log_level: self.log_level.clone(),
        }
    }

    fn config_path(&self) -> Option<PathBuf> {
        if self.config.is_some() {
            return self.config.clone();
        }
        let path = default_config_path();
        path.exists().then_some(path)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config_path().as_deref(), &cli.overrides())?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    init_logging(&config);

    let deployment = deploy(&config)?;
    let report = serde_json::to_string_pretty(&deployment.report())
        .context("Failed to serialize deployment report")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "Deployment report written");
        }
        None => println!("{report}"),
    }

    Ok(())
}

fn init_logging(config: &DeployConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
