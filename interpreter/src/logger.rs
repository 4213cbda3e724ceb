// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use log::{LevelFilter, Log, Metadata, Record};

/// Writes pipeline diagnostics to stderr. The CLI installs one with the
/// level its `-v` flags ask for; without it the `log` facade stays a no-op.
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    /// Picks the level for the number of `-v` flags given: one means debug,
    /// more means trace.
    #[must_use]
    pub const fn level_for(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Off,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn initialize(level: LevelFilter) {
        let logger = Box::leak(Box::new(Logger {
            level,
        }));

        log::set_max_level(level);
        log::set_logger(logger).expect("failed to install the logger");
        log::debug!("logging at {level}");
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}
