//! Tracing setup.
//!
//! The TUI owns the terminal, so it only logs when a file is given. One-shot
//! commands log to stderr, keeping stdout for the outcome text.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    /// No subscriber installed.
    Off,
    Stderr,
    File(PathBuf),
}

impl LogOutput {
    /// Pick the sink for a front-end: the TUI never writes logs to the terminal.
    pub fn for_mode(interactive: bool, log_file: Option<PathBuf>) -> Self {
        match (interactive, log_file) {
            (_, Some(path)) => LogOutput::File(path),
            (true, None) => LogOutput::Off,
            (false, None) => LogOutput::Stderr,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default `warn`.
pub fn init_logging(output: LogOutput) -> Result<(), AppError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()
        .map_err(|e| AppError::usage(format!("Invalid RUST_LOG filter: {e}")))?;

    let layer = match output {
        LogOutput::Off => return Ok(()),
        LogOutput::Stderr => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter)
            .boxed(),
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .map_err(|e| {
                    AppError::usage(format!("Failed to open log file {}: {e}", path.display()))
                })?;
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(filter)
                .boxed()
        }
    };

    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer))
        .map_err(|e| AppError::runtime(format!("Failed to install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tui_stays_silent_without_a_file() {
        assert_eq!(LogOutput::for_mode(true, None), LogOutput::Off);
        assert_eq!(LogOutput::for_mode(false, None), LogOutput::Stderr);
        assert_eq!(
            LogOutput::for_mode(true, Some(PathBuf::from("loans.log"))),
            LogOutput::File(PathBuf::from("loans.log"))
        );
    }

    #[test]
    fn off_installs_nothing() {
        assert!(init_logging(LogOutput::Off).is_ok());
    }
}
