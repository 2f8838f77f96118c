//! Logging utilities for DaoScaffold
//!
//! This module provides logging setup and configuration.

use std::fs::File;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Parse a level name, defaulting to INFO
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize logging based on configuration
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let config = match config {
        Some(cfg) => cfg,
        None => return Ok(()), // No logging configuration, use defaults
    };

    let level = parse_level(&config.level);
    let directive: Directive = format!("dao_scaffold={}", level)
        .parse()
        .map_err(|e| Error::ConfigError(format!("Invalid log directive: {}", e)))?;
    let env_filter = EnvFilter::from_default_env().add_directive(directive);
    let json = config.format.eq_ignore_ascii_case("json");

    match log_sink(config) {
        LogSink::File(file_path) => {
            if let Some(parent) = Path::new(&file_path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(&file_path)?;
            let builder = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(file)
                .with_ansi(false);
            if json {
                install(builder.json().finish())
            } else {
                install(builder.finish())
            }
        }
        LogSink::Stderr => {
            // stdout carries command output
            let builder = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr);
            if json {
                install(builder.json().finish())
            } else {
                install(builder.finish())
            }
        }
        LogSink::Off => Ok(()),
    }
}

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(String),
    Stderr,
    Off,
}

/// Pick the sink for `config`; a log file wins over the console
pub fn log_sink(config: &LoggingConfig) -> LogSink {
    match &config.file {
        Some(file) => LogSink::File(file.clone()),
        None if config.console => LogSink::Stderr,
        None => LogSink::Off,
    }
}

fn install<S>(subscriber: S) -> Result<()>
where
    S: tracing::Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::ConfigError(format!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_console_logging_goes_to_stderr() {
        let mut config = LoggingConfig::default();
        assert_eq!(log_sink(&config), LogSink::Stderr);

        config.file = Some("logs/dao_scaffold.log".to_string());
        assert_eq!(log_sink(&config), LogSink::File("logs/dao_scaffold.log".to_string()));

        config.file = None;
        config.console = false;
        assert_eq!(log_sink(&config), LogSink::Off);
    }

    #[test]
    fn test_no_config_is_noop() {
        assert!(init_logging(&None).is_ok());
    }
}
