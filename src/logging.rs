//! Verbose diagnostics for the engine and the command-line tools.
//!
//! Logging is off by default. `enable_verbose_logging` turns it on; lines go
//! to the file set with `init_log_file`, or to stderr when no file is set.
//! Use the `vlog!` macro so the message is only formatted when verbose.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Opens (and truncates) `path` as the destination for verbose lines.
pub fn init_log_file(path: impl AsRef<Path>) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut log_file = LOG_FILE
        .lock()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
    *log_file = Some(file);
    Ok(())
}

/// Writes one line to the log file, or stderr if none was configured.
pub fn write_log(message: &str) {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = writeln!(file, "{}", message);
            let _ = file.flush();
            return;
        }
    }
    eprintln!("{}", message);
}

pub fn enable_verbose_logging() {
    VERBOSE_LOGGING.store(true, Ordering::Relaxed);
}

pub fn disable_verbose_logging() {
    VERBOSE_LOGGING.store(false, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// Logs a formatted line when verbose logging is enabled.
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(&message);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        enable_verbose_logging();
        assert!(is_verbose());
        crate::vlog!("verbose line {}", 1);
        disable_verbose_logging();
        assert!(!is_verbose());
    }
}
