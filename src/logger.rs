use std::env;
use std::str::FromStr;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the maximum log level (`error` .. `trace`).
pub const LOG_LEVEL_VAR: &str = "GRADDESC_LOG";

struct Logger {
    level: LevelFilter,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!(
            "{} [{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn level_from_env() -> LevelFilter {
    env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Installs the timestamped stderr logger with the level taken from `GRADDESC_LOG`.
pub fn init_logger() -> Result<(), SetLoggerError> {
    init_logger_with_level(level_from_env())
}

pub fn init_logger_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger { level }))?;
    log::set_max_level(level);
    Ok(())
}
