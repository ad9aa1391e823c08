//! Environment-sourced configuration. Kept in its own test binary and run
//! serially because the process environment is shared.

use dca_deploy::{load_config, DeployOverrides};
use dca_types::Address;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const GOVERNOR: &str = "0x6060606060606060606060606060606060606060";
const FEE_RECIPIENT: &str = "0xfefefefefefefefefefefefefefefefefefefefe";

/// Sets `DCA_*` variables and clears them again on drop
struct EnvVars(Vec<&'static str>);

impl EnvVars {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            env::set_var(key, value);
        }
        EnvVars(vars.iter().map(|(key, _)| *key).collect())
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.0 {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn all_digit_governor_is_kept_verbatim() {
    let digits = "1111111111111111111111111111111111111111";
    let _env = EnvVars::set(&[("DCA_GOVERNOR", digits), ("DCA_FEE_RECIPIENT", FEE_RECIPIENT)]);

    let config = load_config(None, &DeployOverrides::default()).unwrap();
    assert_eq!(config.governor, digits.parse::<Address>().unwrap());
    assert_eq!(config.governor, Address::repeat_byte(0x11));
}

#[test]
#[serial]
fn env_values_override_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deploy.toml");
    fs::write(
        &path,
        format!(
            r#"
governor = "{GOVERNOR}"
fee_recipient = "{FEE_RECIPIENT}"
fee = 1000
swap_intervals = [86400]
"#
        ),
    )
    .unwrap();

    let _env = EnvVars::set(&[
        ("DCA_GOVERNOR", "0x7777777777777777777777777777777777777777"),
        ("DCA_FEE", "6000"),
        ("DCA_SWAP_INTERVALS", "60,3600"),
        ("DCA_FEE_TIERS", "500"),
    ]);

    let config = load_config(Some(&path), &DeployOverrides::default()).unwrap();
    assert_eq!(config.governor, Address::repeat_byte(0x77));
    assert_eq!(config.fee_recipient, FEE_RECIPIENT.parse::<Address>().unwrap());
    assert_eq!(config.fee, Some(6000));
    assert_eq!(config.swap_intervals, vec![60, 3600]);
    assert_eq!(config.fee_tiers, vec![500]);
}

#[test]
#[serial]
fn cli_overrides_beat_env() {
    let _env = EnvVars::set(&[
        ("DCA_GOVERNOR", GOVERNOR),
        ("DCA_FEE_RECIPIENT", FEE_RECIPIENT),
        ("DCA_SWAP_INTERVALS", "60,3600"),
        ("DCA_FEE", "6000"),
    ]);

    let overrides = DeployOverrides {
        governor: Some(Address::repeat_byte(0x99)),
        swap_intervals: vec![300],
        fee: Some(100),
        ..Default::default()
    };
    let config = load_config(None, &overrides).unwrap();
    assert_eq!(config.governor, Address::repeat_byte(0x99));
    assert_eq!(config.swap_intervals, vec![300]);
    assert_eq!(config.fee, Some(100));
    assert_eq!(config.fee_recipient, FEE_RECIPIENT.parse::<Address>().unwrap());
}

#[test]
#[serial]
fn malformed_env_interval_is_rejected() {
    let _env = EnvVars::set(&[
        ("DCA_GOVERNOR", GOVERNOR),
        ("DCA_FEE_RECIPIENT", FEE_RECIPIENT),
        ("DCA_SWAP_INTERVALS", "60,hourly"),
    ]);

    let err = load_config(None, &DeployOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid deployment configuration"));
}
