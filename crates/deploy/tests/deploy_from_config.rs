use dca_deploy::{deploy, load_config, DeployOverrides};
use dca_governance::{GovernanceEvent, DEFAULT_FEE};
use dca_types::Address;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const GOVERNOR: &str = "0x6060606060606060606060606060606060606060";
const FEE_RECIPIENT: &str = "0xfefefefefefefefefefefefefefefefefefefefe";

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("deploy.toml");
    fs::write(&path, contents).expect("config file should be writable");
    path
}

#[test]
fn file_config_drives_full_deployment() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &format!(
            r#"
governor = "{GOVERNOR}"
fee_recipient = "{FEE_RECIPIENT}"
fee = 6000
swap_intervals = [3600, 86400]
"#
        ),
    );

    let config = load_config(Some(&path), &DeployOverrides::default()).unwrap();
    assert_eq!(config.fee_tiers, vec![500, 3000, 10000]);
    assert_eq!(config.deployer(), GOVERNOR.parse::<Address>().unwrap());

    let report = deploy(&config).unwrap().report();
    assert_eq!(report.factory.fee, 6000);
    assert_eq!(report.factory.fee_recipient, FEE_RECIPIENT.parse::<Address>().unwrap());
    assert_eq!(report.factory.allowed_swap_intervals, vec![3600, 86400]);
    assert_eq!(report.oracle.supported_fee_tiers, vec![500, 3000, 10000]);

    let events: Vec<GovernanceEvent> = report
        .steps
        .iter()
        .flat_map(|step| step.events.clone())
        .collect();
    assert_eq!(
        events,
        vec![
            GovernanceEvent::FeeRecipientSet(FEE_RECIPIENT.parse().unwrap()),
            GovernanceEvent::FeeSet(6000),
            GovernanceEvent::SwapIntervalsAllowed(vec![3600, 86400]),
            GovernanceEvent::AddedFeeTier(500),
            GovernanceEvent::AddedFeeTier(3000),
            GovernanceEvent::AddedFeeTier(10000),
        ]
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["oracle"]["factory"], "0x1f98431c8ad98523631ae4a59f267346ea31f984");
}

#[test]
fn overrides_take_precedence_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        &format!(
            r#"
governor = "{GOVERNOR}"
fee_recipient = "{FEE_RECIPIENT}"
fee_tiers = [500]
"#
        ),
    );

    let overrides = DeployOverrides {
        governor: Some(Address::repeat_byte(0x77)),
        fee_tiers: vec![100, 10000],
        swap_intervals: vec![60],
        ..Default::default()
    };
    let config = load_config(Some(&path), &overrides).unwrap();
    assert_eq!(config.governor, Address::repeat_byte(0x77));
    assert_eq!(config.fee_tiers, vec![100, 10000]);
    assert_eq!(config.swap_intervals, vec![60]);

    let deployment = deploy(&config).unwrap();
    assert_eq!(deployment.factory.fee(), DEFAULT_FEE);
    assert!(deployment.factory.is_swap_interval_allowed(60));
    assert_eq!(deployment.oracle.supported_fee_tiers(), vec![100, 10000]);
}

#[test]
fn missing_governor_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &format!("fee_recipient = \"{FEE_RECIPIENT}\"\n"));

    let err = load_config(Some(&path), &DeployOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid deployment configuration"));
}

#[test]
fn zero_fee_recipient_fails_deployment() {
    let overrides = DeployOverrides {
        governor: Some(GOVERNOR.parse().unwrap()),
        fee_recipient: Some(Address::ZERO),
        ..Default::default()
    };
    let config = load_config(None, &overrides).unwrap();

    let err = deploy(&config).unwrap_err();
    assert!(format!("{err:#}").contains("zero address for fee_recipient"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml")), &DeployOverrides::default())
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}
