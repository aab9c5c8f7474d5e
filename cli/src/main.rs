use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::{path::Path, process::ExitCode};

use dappmint_cli::{
    error_report, execute,
    logging::{init_logger, LoggerConfig},
    CliConfig, StateStore, ValidatedConfig,
};
use dappmint_common::config::VERSION;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_report(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli_config = CliConfig::parse();

    // Handle config template generation
    if let Some(path) = cli_config.config_file.as_ref() {
        if cli_config.generate_config_template {
            if Path::new(path).exists() {
                eprintln!("Config file already exists at {path}");
                eprintln!("Use a different path or remove the existing file");
                return Ok(());
            }

            ValidatedConfig::generate_template(path)?;
            println!("Configuration template generated at {path}");
            println!("Edit the file and run the application with --config-file {path}");
            return Ok(());
        }
    }

    let command = cli_config
        .command
        .clone()
        .context("No command given, run with --help to list them")?;

    // Load and validate configuration
    let config = cli_config.load_config()?;

    // Initialize logging
    init_logger(&LoggerConfig {
        level: config.log_level,
        dir_path: &config.logs_path,
        filename_log: &config.filename_log,
        disable_file_logging: config.disable_file_logging,
        disable_colors: config.disable_log_color,
    })?;

    if log::log_enabled!(log::Level::Debug) {
        debug!("DappMint v{} using state {}", VERSION, config.state_file);
    }

    let mut store = StateStore::open(&config.state_file)?;
    debug!(
        "Loaded state from {} at height {}",
        store.path().display(),
        store.block_height()
    );
    let call = cli_config.call_context(&config, store.next_block_height())?;

    let output = execute(store.sale_mut(), &call, &command)?;
    if command.is_mutating() {
        store.commit()?;
        if log::log_enabled!(log::Level::Info) {
            info!(
                "Applied {:?} at height {}",
                command,
                store.block_height()
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
