//! Command line parsing, configuration merging and failure output

use clap::Parser;
use tempfile::TempDir;

use dappmint_cli::{error_report, execute, CliConfig, Command, StateStore, ValidatedConfig};
use dappmint_common::{crypto::Address, sale::SaleError, utils::from_coin};

fn configured_caller() -> Address {
    Address::new([7u8; 20])
}

fn path_in(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).display().to_string()
}

/// Config file with file logging off and a default caller
fn write_config(dir: &TempDir) -> String {
    let config = ValidatedConfig {
        disable_file_logging: true,
        state_file: path_in(dir, "from_file/dappmint.json"),
        default_caller: Some(configured_caller()),
        ..ValidatedConfig::default()
    };
    let path = path_in(dir, "config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

/// `--state` overrides the state path of the config file
#[test]
fn test_state_flag_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let state = path_in(&dir, "override/sale.json");

    let cli = CliConfig::try_parse_from([
        "dappmint",
        "--config-file",
        &config_path,
        "--state",
        &state,
        "info",
    ])
    .unwrap();
    let config = cli.load_config().unwrap();

    assert_eq!(config.state_file, state);
    assert_eq!(config.default_caller, Some(configured_caller()));
    assert!(config.disable_file_logging);
    assert!(dir.path().join("override").is_dir());
    assert!(!dir.path().join("from_file").exists());
}

/// Without `--state` the config file decides
#[test]
fn test_config_file_state_used_without_flag() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);

    let cli = CliConfig::try_parse_from(["dappmint", "--config-file", &config_path, "minted"])
        .unwrap();
    let config = cli.load_config().unwrap();
    assert_eq!(config.state_file, path_in(&dir, "from_file/dappmint.json"));
}

/// A state path that is not a JSON document is refused, not redirected
#[test]
fn test_non_json_state_flag_rejected() {
    let dir = TempDir::new().unwrap();
    let state = path_in(&dir, "mysale.state");

    let cli = CliConfig::try_parse_from([
        "dappmint",
        "--disable-file-logging",
        "--state",
        &state,
        "info",
    ])
    .unwrap();
    assert!(cli.to_validated_config().auto_fix_config);

    let error = cli.load_config().unwrap_err();
    assert!(error.to_string().contains("mysale.state"));
}

/// The configured caller signs calls when `--from` is omitted
#[test]
fn test_default_caller_fallback() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);

    let cli = CliConfig::try_parse_from([
        "dappmint",
        "--config-file",
        &config_path,
        "deploy",
        "ipfs://base/",
        "10",
        "4",
        "6",
        "5",
    ])
    .unwrap();
    let config = cli.load_config().unwrap();
    let mut store = StateStore::open(&config.state_file).unwrap();
    let call = cli
        .call_context(&config, store.next_block_height())
        .unwrap();
    assert_eq!(call.caller, Some(configured_caller()));

    let command = cli.command.clone().unwrap();
    execute(store.sale_mut(), &call, &command).unwrap();
    let owner = store.sale().contract.as_ref().unwrap().owner;
    assert_eq!(owner, configured_caller());
}

/// `--from` wins over the configured caller and `--value` is parsed in coins
#[test]
fn test_from_flag_overrides_default_caller() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(&dir);
    let signer = Address::new([9u8; 20]);
    let signer_text = signer.to_string();

    let cli = CliConfig::try_parse_from([
        "dappmint",
        "--config-file",
        &config_path,
        "--from",
        &signer_text,
        "--value",
        "0.04",
        "mint",
        "2",
        "1",
    ])
    .unwrap();
    let config = cli.load_config().unwrap();
    let call = cli.call_context(&config, 5).unwrap();

    assert_eq!(call.caller, Some(signer));
    assert_eq!(call.value, from_coin("0.04").unwrap());
    assert_eq!(call.block_height, 5);
}

#[test]
fn test_invalid_value_flag() {
    let cli = CliConfig::try_parse_from(["dappmint", "--value", "abc", "receive"]).unwrap();
    let config = ValidatedConfig::default();
    assert!(cli.call_context(&config, 1).is_err());
}

/// Contract failures print the reason with the numeric code
#[test]
fn test_error_report_format() {
    let dir = TempDir::new().unwrap();
    let mut store = StateStore::open(dir.path().join("dappmint.json")).unwrap();
    let owner = configured_caller();

    let deploy = Command::Deploy {
        base_uri: "ipfs://base/".to_string(),
        max_supply: 10,
        stage_one_max: 4,
        stage_two_max: 6,
        airdrop_max: 5,
        admin: None,
        nonce: 0,
    };
    let call = dappmint_cli::CallContext {
        caller: Some(owner),
        value: Default::default(),
        block_height: 1,
    };
    execute(store.sale_mut(), &call, &deploy).unwrap();

    let paying = dappmint_cli::CallContext {
        value: from_coin("0.02").unwrap(),
        ..call.clone()
    };
    let error = execute(
        store.sale_mut(),
        &paying,
        &Command::Mint { count: 1, stage: 1 },
    )
    .unwrap_err();
    assert_eq!(
        error_report(&error),
        format!(
            "Error: {} (code {})",
            SaleError::StageOnePaused,
            SaleError::StageOnePaused.code()
        )
    );
    assert_eq!(
        error_report(&error),
        "Error: Stage one paused, check back later (code 101)"
    );

    // Host errors carry no code
    let error = execute(store.sale_mut(), &paying, &Command::JoinWhiteList).unwrap_err();
    assert_eq!(error_report(&error), "Error: This command does not accept value");
}
