use crate::consts::dashboard_consts::storage::LOG_DIR_NAME;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use std::env;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "crypto-dashboard";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Rotating files under `<data_dir>/logs`; the terminal belongs to the UI.
    File,
    /// Plain stderr, for headless runs and one-shot commands.
    Stderr,
}

/// Starts the global logger. Keep the returned handle alive for the whole run.
pub fn init_logging(target: LogTarget, data_dir: &Path) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = rust_log_spec();
    let logger = Logger::try_with_str(&level)?;
    match target {
        LogTarget::File => logger
            .log_to_file(
                FileSpec::default()
                    .directory(data_dir.join(LOG_DIR_NAME))
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start(),
        LogTarget::Stderr => logger.log_to_stderr().start(),
    }
}

fn rust_log_spec() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

pub fn get_rust_log_level() -> LogLevel {
    parse_rust_log_level(&rust_log_spec())
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    // Handle common RUST_LOG formats
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info, // Default to info if parsing fails
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = get_rust_log_level();
    should_log(event_level, threshold)
}
