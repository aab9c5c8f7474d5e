//! DappMint command line host
//!
//! Persists the sale contract in a JSON document and drives every contract
//! operation from the command line.

pub mod cli;
pub mod command;
pub mod config;
pub mod logging;
pub mod storage;

pub use cli::{error_report, CliConfig};
pub use command::{execute, query, CallContext, Command};
pub use config::{ConfigValidationError, ConfigValidator, ValidatedConfig};
pub use storage::{StateDocument, StateStore};
