use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

pub fn get_logger() -> &'static StderrLogger {
    LOGGER.get_or_init(|| StderrLogger::new(Level::Warn))
}

/// Installs the logger, showing messages up to `level`.
///
/// Can be called more than once, later calls only change the level.
pub fn init(level: Level) {
    let logger = get_logger();
    logger.set_min_level(level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Maps the number of `-v` flags to a level, starting at warnings.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Writes records to stderr, keeping stdout for the maze itself.
pub struct StderrLogger {
    min_level: RwLock<Level>,
}

impl StderrLogger {
    fn new(min_level: Level) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> Level {
        *self
            .min_level
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_min_level(&self, level: Level) {
        *self
            .min_level
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
    }

    pub fn format(record: &Record) -> String {
        format!(
            "[{:<5}] {} -> {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // nowhere left to report a failed write
            let _ = writeln!(io::stderr(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
