//! Deployment configuration
//!
//! Sources, lowest to highest precedence: optional config file, `DCA_*`
//! environment variables, command-line overrides.

use anyhow::{Context, Result};
use config::{Config, Environment, File as ConfigFile};
use dca_governance::{FeeTier, UNISWAP_V3_FACTORY_ADDRESS};
use dca_types::{Address, Fee, SwapInterval};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "DCA";

/// Everything needed to stand up the factory parameters and the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Identity that instantiates the components; defaults to the governor
    #[serde(default)]
    pub deployer: Option<Address>,
    pub governor: Address,
    pub fee_recipient: Address,
    #[serde(default = "default_uniswap_v3_factory")]
    pub uniswap_v3_factory: Address,
    #[serde(default = "default_fee_tiers", deserialize_with = "lenient::u32_list")]
    pub fee_tiers: Vec<Fee>,
    #[serde(default, deserialize_with = "lenient::u32_list")]
    pub swap_intervals: Vec<SwapInterval>,
    /// Protocol fee to set after deployment; the factory default is kept when absent
    #[serde(default, deserialize_with = "lenient::optional_u32")]
    pub fee: Option<Fee>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_uniswap_v3_factory() -> Address {
    UNISWAP_V3_FACTORY_ADDRESS
}

fn default_fee_tiers() -> Vec<Fee> {
    FeeTier::ALL.iter().map(|tier| tier.fee()).collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

/// Numeric fields arrive as numbers from files and overrides, but as raw
/// strings from the environment, which is read without type guessing so that
/// all-digit addresses stay strings.
mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    impl NumberOrText {
        fn into_u32<E: de::Error>(self) -> Result<u32, E> {
            match self {
                NumberOrText::Number(value) => Ok(value),
                NumberOrText::Text(text) => parse_u32(&text),
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrText {
        List(Vec<NumberOrText>),
        Text(String),
    }

    fn parse_u32<E: de::Error>(text: &str) -> Result<u32, E> {
        text.trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid unsigned integer `{text}`")))
    }

    /// A sequence, or a comma-separated string such as `60,3600`
    pub fn u32_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
        match ListOrText::deserialize(deserializer)? {
            ListOrText::List(items) => items.into_iter().map(NumberOrText::into_u32).collect(),
            ListOrText::Text(text) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(parse_u32)
                .collect(),
        }
    }

    pub fn optional_u32<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        Option::<NumberOrText>::deserialize(deserializer)?
            .map(NumberOrText::into_u32)
            .transpose()
    }
}

impl DeployConfig {
    /// Identity issuing the instantiation calls
    pub fn deployer(&self) -> Address {
        self.deployer.unwrap_or(self.governor)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Command-line values that take precedence over file and environment
#[derive(Debug, Clone, Default)]
pub struct DeployOverrides {
    pub deployer: Option<Address>,
    pub governor: Option<Address>,
    pub fee_recipient: Option<Address>,
    pub uniswap_v3_factory: Option<Address>,
    pub fee: Option<Fee>,
    pub fee_tiers: Vec<Fee>,
    pub swap_intervals: Vec<SwapInterval>,
    pub log_level: Option<String>,
}

fn as_config_list(values: &[u32]) -> Vec<i64> {
    values.iter().map(|&value| i64::from(value)).collect()
}

/// Load the deployment configuration
pub fn load_config(path: Option<&Path>, overrides: &DeployOverrides) -> Result<DeployConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file {} not found (specified via --config)",
                path.display()
            );
        }
        builder = builder.add_source(ConfigFile::from(path));
    }

    // values stay strings; numeric fields are parsed by their deserializers
    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(false));

    builder = builder
        .set_override_option("deployer", overrides.deployer.map(|a| a.to_string()))?
        .set_override_option("governor", overrides.governor.map(|a| a.to_string()))?
        .set_override_option("fee_recipient", overrides.fee_recipient.map(|a| a.to_string()))?
        .set_override_option(
            "uniswap_v3_factory",
            overrides.uniswap_v3_factory.map(|a| a.to_string()),
        )?
        .set_override_option("fee", overrides.fee.map(i64::from))?
        .set_override_option("log_level", overrides.log_level.clone())?;

    if !overrides.fee_tiers.is_empty() {
        builder = builder.set_override("fee_tiers", as_config_list(&overrides.fee_tiers))?;
    }
    if !overrides.swap_intervals.is_empty() {
        builder =
            builder.set_override("swap_intervals", as_config_list(&overrides.swap_intervals))?;
    }

    builder
        .build()
        .context("Failed to assemble deployment configuration")?
        .try_deserialize()
        .context("Invalid deployment configuration (governor and fee_recipient are required)")
}

/// Default location checked when `--config` is not given
pub fn default_config_path() -> PathBuf {
    PathBuf::from("deploy.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mainnet_script() {
        assert_eq!(default_fee_tiers(), vec![500, 3000, 10000]);
        assert_eq!(
            default_uniswap_v3_factory().to_string(),
            "0x1f98431c8ad98523631ae4a59f267346ea31f984"
        );
    }

    #[test]
    fn deployer_falls_back_to_governor() {
        let config = DeployConfig {
            deployer: None,
            governor: Address::repeat_byte(1),
            fee_recipient: Address::repeat_byte(2),
            uniswap_v3_factory: default_uniswap_v3_factory(),
            fee_tiers: default_fee_tiers(),
            swap_intervals: vec![],
            fee: None,
            log_level: default_log_level(),
            log_format: default_log_format(),
        };
        assert_eq!(config.deployer(), Address::repeat_byte(1));

        let rendered = config.to_toml().unwrap();
        let parsed: DeployConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn numeric_fields_accept_strings() {
        let parsed: DeployConfig = toml::from_str(
            r#"
governor = "0x0101010101010101010101010101010101010101"
fee_recipient = "0x0202020202020202020202020202020202020202"
fee = " 6000 "
fee_tiers = "500, 3000"
swap_intervals = ["60", 3600]
"#,
        )
        .unwrap();

        assert_eq!(parsed.fee, Some(6000));
        assert_eq!(parsed.fee_tiers, vec![500, 3000]);
        assert_eq!(parsed.swap_intervals, vec![60, 3600]);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let result: std::result::Result<DeployConfig, _> = toml::from_str(
            r#"
governor = "0x0101010101010101010101010101010101010101"
fee_recipient = "0x0202020202020202020202020202020202020202"
swap_intervals = "60,soon"
"#,
        );
        assert!(result.is_err());
    }
}
