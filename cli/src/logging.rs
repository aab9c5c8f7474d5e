use anyhow::{Context, Result};
use clap::ValueEnum;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Timestamp format of every log line
pub const LOGS_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub struct LoggerConfig<'a> {
    pub level: LogLevel,
    pub dir_path: &'a str,
    pub filename_log: &'a str,
    pub disable_file_logging: bool,
    pub disable_colors: bool,
}

/// Install the global logger
///
/// Console output goes to stderr so command results on stdout stay parseable.
pub fn init_logger(config: &LoggerConfig) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack);
    let disable_colors = config.disable_colors;

    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = if disable_colors {
                record.level().to_string()
            } else {
                colors.color(record.level()).to_string()
            };
            out.finish(format_args!(
                "[{}] [{}] [{}] {}",
                chrono::Local::now().format(LOGS_DATETIME_FORMAT),
                level,
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = fern::Dispatch::new()
        .level(config.level.into())
        .chain(console);

    if !config.disable_file_logging {
        std::fs::create_dir_all(config.dir_path)
            .with_context(|| format!("Failed to create logs directory '{}'", config.dir_path))?;
        let path = Path::new(config.dir_path).join(config.filename_log);
        let file = fern::log_file(&path)
            .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{}] [{}] [{}] {}",
                        chrono::Local::now().format(LOGS_DATETIME_FORMAT),
                        record.level(),
                        record.target(),
                        message
                    ))
                })
                .chain(file),
        );
    }

    dispatch.apply().context("Logger already initialized")?;
    Ok(())
}
