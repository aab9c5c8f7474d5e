use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use dappmint_common::crypto::Address;

use crate::logging::LogLevel;

/// Default values for configuration
pub mod defaults {
    use super::*;

    pub const LOG_LEVEL: LogLevel = LogLevel::Info;
    pub const FILENAME_LOG: &str = "dappmint.log";
    pub const LOGS_PATH: &str = "logs/";
    pub const STATE_FILE: &str = "storage/dappmint.json";
    pub const STATE_FILE_EXTENSION: &str = "json";
}

/// Enhanced configuration with validation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidatedConfig {
    /// Log level configuration
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// File logging settings
    #[serde(default)]
    pub disable_file_logging: bool,

    #[serde(default)]
    pub disable_log_color: bool,

    #[serde(default = "default_filename_log")]
    pub filename_log: String,

    #[serde(default = "default_logs_path")]
    pub logs_path: String,

    /// Contract state document
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Caller used when `--from` is omitted
    #[serde(default)]
    pub default_caller: Option<Address>,

    /// Auto-fix configuration issues
    #[serde(default = "default_auto_fix")]
    pub auto_fix_config: bool,

    /// Validation settings
    #[serde(default)]
    pub strict_validation: bool,
}

// Default functions for serde
fn default_log_level() -> LogLevel {
    defaults::LOG_LEVEL
}
fn default_filename_log() -> String {
    defaults::FILENAME_LOG.to_string()
}
fn default_logs_path() -> String {
    defaults::LOGS_PATH.to_string()
}
fn default_state_file() -> String {
    defaults::STATE_FILE.to_string()
}
fn default_auto_fix() -> bool {
    true
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            disable_file_logging: false,
            disable_log_color: false,
            filename_log: default_filename_log(),
            logs_path: default_logs_path(),
            state_file: default_state_file(),
            default_caller: None,
            auto_fix_config: default_auto_fix(),
            strict_validation: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("Invalid {field}: '{path}' - {reason}")]
    InvalidPath {
        field: String,
        path: String,
        reason: String,
    },

    #[error("Invalid default caller: '{0}' - the zero address cannot sign calls")]
    InvalidCaller(String),

    #[error("Log file conflict: '{filename}' already exists in directory '{logs_path}'")]
    DuplicateLogFile { logs_path: String, filename: String },
}

/// Configuration validation result
pub type ValidationResult<T> = std::result::Result<T, ConfigValidationError>;

/// Configuration validator
pub struct ConfigValidator {
    strict_mode: bool,
    auto_fix: bool,
}

impl ConfigValidator {
    pub fn new(strict_mode: bool, auto_fix: bool) -> Self {
        Self {
            strict_mode,
            auto_fix,
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self, config: &mut ValidatedConfig) -> Result<Vec<String>> {
        let mut warnings = Vec::new();
        let mut fixed_issues = Vec::new();

        debug!("Validating configuration...");

        // The state file is the contract itself, never substitute another one
        self.validate_state_file(&config.state_file)
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        // Validate log filename
        if let Err(e) = self.validate_filename_log(&config.filename_log) {
            if self.auto_fix && !self.strict_mode {
                if log::log_enabled!(log::Level::Warn) {
                    warn!("Auto-fixing log filename: {}", e);
                }
                config.filename_log = defaults::FILENAME_LOG.to_string();
                fixed_issues.push(format!(
                    "Fixed log filename to default: {}",
                    config.filename_log
                ));
            } else {
                return Err(anyhow!("Configuration validation failed: {}", e));
            }
        }

        // Validate default caller if provided
        if let Some(ref caller) = config.default_caller {
            if let Err(e) = self.validate_caller(caller) {
                if self.strict_mode {
                    return Err(anyhow!("Configuration validation failed: {}", e));
                } else {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        // Validate and create directories
        self.validate_and_create_paths(config, &mut warnings, &mut fixed_issues)?;

        // Report results
        if !fixed_issues.is_empty() {
            if log::log_enabled!(log::Level::Info) {
                info!("Auto-fixed {} configuration issue(s):", fixed_issues.len());
            }
            for fix in &fixed_issues {
                if log::log_enabled!(log::Level::Info) {
                    info!("  {}", fix);
                }
            }
        }

        if !warnings.is_empty() {
            warn!("Configuration warnings:");
            for warning in &warnings {
                if log::log_enabled!(log::Level::Warn) {
                    warn!("  {}", warning);
                }
            }
        }

        let mut all_messages = fixed_issues;
        all_messages.extend(warnings);

        debug!("Configuration validation completed successfully");
        Ok(all_messages)
    }

    fn validate_state_file(&self, path: &str) -> ValidationResult<()> {
        if path.trim().is_empty() {
            return Err(ConfigValidationError::InvalidPath {
                field: "state_file".to_string(),
                path: path.to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
        if extension != Some(defaults::STATE_FILE_EXTENSION) {
            return Err(ConfigValidationError::InvalidPath {
                field: "state_file".to_string(),
                path: path.to_string(),
                reason: format!("must be a .{} file", defaults::STATE_FILE_EXTENSION),
            });
        }
        Ok(())
    }

    fn validate_filename_log(&self, filename: &str) -> ValidationResult<()> {
        if filename.trim().is_empty() || filename.contains('/') || filename.contains('\\') {
            return Err(ConfigValidationError::InvalidPath {
                field: "filename_log".to_string(),
                path: filename.to_string(),
                reason: "must be a plain file name".to_string(),
            });
        }
        Ok(())
    }

    fn validate_caller(&self, caller: &Address) -> ValidationResult<()> {
        if caller.is_zero() {
            return Err(ConfigValidationError::InvalidCaller(caller.to_string()));
        }
        Ok(())
    }

    fn validate_and_create_paths(
        &self,
        config: &ValidatedConfig,
        warnings: &mut Vec<String>,
        fixed_issues: &mut Vec<String>,
    ) -> Result<()> {
        // Validate and create logs directory
        if !config.disable_file_logging {
            self.ensure_directory_exists(Path::new(&config.logs_path), "logs", fixed_issues)?;

            // Check for potential log file conflicts
            let log_path = Path::new(&config.logs_path).join(&config.filename_log);
            if log_path.exists() && log_path.metadata()?.len() > 0 {
                let conflict = ConfigValidationError::DuplicateLogFile {
                    logs_path: config.logs_path.clone(),
                    filename: config.filename_log.clone(),
                };
                warnings.push(format!("{} - logs will be appended", conflict));
            }
        }

        // Validate and create state directory
        if let Some(parent) = Path::new(&config.state_file).parent() {
            if !parent.as_os_str().is_empty() {
                self.ensure_directory_exists(parent, "state", fixed_issues)?;
            }
        }

        Ok(())
    }

    fn ensure_directory_exists(
        &self,
        path: &Path,
        dir_type: &str,
        fixed_issues: &mut Vec<String>,
    ) -> Result<()> {
        let path_buf = PathBuf::from(path);

        if !path_buf.exists() {
            if log::log_enabled!(log::Level::Info) {
                info!("Creating {} directory: {}", dir_type, path.display());
            }
            std::fs::create_dir_all(&path_buf).map_err(|e| {
                anyhow!(
                    "Failed to create {} directory '{}': {}",
                    dir_type,
                    path.display(),
                    e
                )
            })?;
            fixed_issues.push(format!("Created {} directory: {}", dir_type, path.display()));
        } else if !path_buf.is_dir() {
            return Err(anyhow!(
                "Path '{}' exists but is not a directory",
                path.display()
            ));
        }

        Ok(())
    }
}

impl ValidatedConfig {
    /// Load configuration from file
    ///
    /// The result still has to go through `ConfigValidator` once command
    /// line overrides are applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        let config: ValidatedConfig = serde_json::from_str(&content).map_err(|e| {
            anyhow!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        if log::log_enabled!(log::Level::Debug) {
            debug!("Configuration loaded from: {}", path.as_ref().display());
        }
        Ok(config)
    }

    /// Generate a configuration template with descriptive structure
    pub fn generate_template<P: AsRef<Path>>(path: P) -> Result<()> {
        let template = format!(
            r#"{{
  "_info": {{
    "description": "DappMint Configuration",
    "version": "1.0",
    "sections": {{
      "logging": "Controls log output and file generation",
      "state": "JSON document holding the deployed contract",
      "caller": "Address used when --from is omitted",
      "validation": "Configuration validation behavior"
    }}
  }},
  "log_level": "info",
  "disable_file_logging": false,
  "disable_log_color": false,
  "filename_log": "{}",
  "logs_path": "{}",
  "state_file": "{}",
  "default_caller": null,
  "auto_fix_config": true,
  "strict_validation": false
}}"#,
            defaults::FILENAME_LOG,
            defaults::LOGS_PATH,
            defaults::STATE_FILE
        );

        std::fs::write(&path, template).map_err(|e| {
            anyhow!(
                "Failed to write template to '{}': {}",
                path.as_ref().display(),
                e
            )
        })?;

        if log::log_enabled!(log::Level::Info) {
            info!(
                "Configuration template generated at: {}",
                path.as_ref().display()
            );
        }
        Ok(())
    }
}
