use anyhow::{Context, Result};
use clap::Parser;
use primitive_types::U256;

use dappmint_common::{
    config::VERSION, crypto::Address, get_cli_styles, sale::SaleError, utils::from_coin,
};

use crate::{
    command::{CallContext, Command},
    config::{defaults, ConfigValidator, ValidatedConfig},
    logging::LogLevel,
};

/// DappMint CLI configuration - wrapper for command line parsing
#[derive(Parser, Clone, Debug)]
#[command(name = "dappmint", version = VERSION, styles = get_cli_styles())]
#[command(about = "DappMint - staged NFT sale contract")]
pub struct CliConfig {
    /// Set log level
    #[clap(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Disable the log file
    #[clap(long)]
    pub disable_file_logging: bool,

    /// Disable the usage of colors in log
    #[clap(long)]
    pub disable_log_color: bool,

    /// Log filename
    #[clap(long, default_value_t = String::from(defaults::FILENAME_LOG))]
    pub filename_log: String,

    /// Logs directory
    #[clap(long, default_value_t = String::from(defaults::LOGS_PATH))]
    pub logs_path: String,

    /// JSON document holding the contract state
    #[clap(long, global = true)]
    pub state: Option<String>,

    /// Address signing the call
    #[clap(long, global = true)]
    pub from: Option<Address>,

    /// Value attached to the call, in coins
    #[clap(long, global = true)]
    pub value: Option<String>,

    /// Enable strict configuration validation
    #[clap(long)]
    pub strict_validation: bool,

    /// Disable auto-fix of configuration issues
    #[clap(long)]
    pub no_auto_fix: bool,

    /// JSON File to load the configuration from
    #[clap(long)]
    pub config_file: Option<String>,

    /// Generate the template at the `config_file` path
    #[clap(long)]
    pub generate_config_template: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl CliConfig {
    /// Convert CLI configuration to ValidatedConfig
    pub fn to_validated_config(&self) -> ValidatedConfig {
        ValidatedConfig {
            log_level: self.log_level,
            disable_file_logging: self.disable_file_logging,
            disable_log_color: self.disable_log_color,
            filename_log: self.filename_log.clone(),
            logs_path: self.logs_path.clone(),
            state_file: self
                .state
                .clone()
                .unwrap_or_else(|| defaults::STATE_FILE.to_string()),
            default_caller: None,
            auto_fix_config: !self.no_auto_fix,
            strict_validation: self.strict_validation,
        }
    }

    /// Build the effective configuration and validate it once
    ///
    /// With `--config-file` the file supplies every setting, `--state` still
    /// overrides the state path.
    pub fn load_config(&self) -> Result<ValidatedConfig> {
        let mut config = match &self.config_file {
            Some(config_path) => {
                let mut config = ValidatedConfig::from_file(config_path)?;
                if let Some(state) = &self.state {
                    config.state_file = state.clone();
                }
                config
            }
            None => self.to_validated_config(),
        };

        let validator = ConfigValidator::new(
            config.strict_validation || self.strict_validation,
            config.auto_fix_config && !self.no_auto_fix,
        );
        validator.validate(&mut config)?;
        Ok(config)
    }

    /// Caller, value and height for the next call
    ///
    /// `--from` wins over the configured default caller.
    pub fn call_context(
        &self,
        config: &ValidatedConfig,
        block_height: u64,
    ) -> Result<CallContext> {
        let value = match self.value.as_deref() {
            Some(value) => {
                from_coin(value).with_context(|| format!("Invalid --value '{}'", value))?
            }
            None => U256::zero(),
        };

        Ok(CallContext {
            caller: self.from.or(config.default_caller),
            value,
            block_height,
        })
    }
}

/// Line printed on stderr when a command fails
pub fn error_report(error: &anyhow::Error) -> String {
    match error.downcast_ref::<SaleError>() {
        Some(sale_error) => format!("Error: {} (code {})", sale_error, sale_error.code()),
        None => format!("Error: {:#}", error),
    }
}
