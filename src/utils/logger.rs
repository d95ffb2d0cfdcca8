//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities. Without a log
//! file the binary falls back to `env_logger`.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

/// Logger that mirrors every record to a file and to stderr
pub struct Logger {
    /// File handle for log output
    file: Mutex<File>,
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file, truncated if it exists
    /// * `level` - Most verbose level that gets written
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new<P: AsRef<Path>>(log_file: P, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(log_file.as_ref())?;
        Ok(Logger {
            file: Mutex::new(file),
            level,
        })
    }

    /// Writes one line to the log file
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        // A poisoned lock still holds a usable file handle
        let mut file = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(file, "{}", message)?;
        file.flush()
    }

    /// Installs a file-mirroring logger as the global logger
    pub fn init_global_logger<P: AsRef<Path>>(log_file: P, level: LevelFilter) -> io::Result<()> {
        let global_logger = Logger::new(log_file, level)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }

    /// Installs `env_logger` on stderr
    ///
    /// `RUST_LOG` takes precedence over `level` when it is set.
    pub fn init_console_logger(level: LevelFilter) {
        let result = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();

        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            let _ = self.write_line(&message);

            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}
