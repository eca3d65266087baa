//! Logger setup for stdout and the session log file
//!
//! The terminal and the log file are given their own minimum levels, so that a cyclic executable
//! can be watched at `DEBUG` on the terminal while the file on disk is kept at `INFO`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::Colorize;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Minimum levels for each log output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLevels {
    /// Minimum level printed to stdout.
    pub stdout: LevelFilter,

    /// Minimum level written to the session log file.
    pub file: LevelFilter
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected the {0} log level to be `INFO` or more verbose, found `{1}`")]
    InvalidMinLogLevel(&'static str, log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LogLevels {
    /// The most verbose of the two levels, which is the level the logger as a whole must accept.
    pub fn most_verbose(&self) -> LevelFilter {
        std::cmp::max(self.stdout, self.file)
    }
}

impl Default for LogLevels {
    fn default() -> Self {
        Self {
            stdout: LevelFilter::Debug,
            file: LevelFilter::Info
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - Both levels must be `log::Level::Info` or more verbose.
/// - Messages from `zmq` are capped at `INFO` on both outputs.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    levels: LogLevels,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    check_levels(&levels)?;

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .level(levels.most_verbose())
        .level_for("zmq", LevelFilter::Info)
        .chain(output_dispatch(levels.stdout, true).chain(std::io::stdout()))
        .chain(output_dispatch(levels.file, false).chain(log_file))
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session.epoch);
    info!("    Stdout log level: {:?}", levels.stdout);
    info!("    File log level: {:?}", levels.file);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

/// Check that neither output would drop `INFO` messages.
pub fn check_levels(levels: &LogLevels) -> Result<(), LoggerInitError> {
    if levels.stdout < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel("stdout", levels.stdout))
    }
    if levels.file < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel("file", levels.file))
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the dispatch for one output. Colour codes are only wanted on a terminal.
fn output_dispatch(level: LevelFilter, colour: bool) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(move |out, message, record| {

            let tag = match colour {
                true => level_to_str(record.level()).to_string(),
                false => level_tag(record.level()).to_string()
            };

            // If debug or trace include the target, otherwise don't include it
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    tag,
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    tag,
                    message
                ))
            }
        })
        .level(level)
}

/// Get the plain three letter tag of a log level
fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info  => "INF",
        log::Level::Warn  => "WRN",
        log::Level::Error => "ERR"
    }
}

/// Get the coloured tag of a log level
fn level_to_str(level: log::Level) -> colored::ColoredString {
    let tag = level_tag(level);
    match level {
        log::Level::Trace => tag.dimmed().italic(),
        log::Level::Debug => tag.dimmed(),
        log::Level::Info  => tag.normal(),
        log::Level::Warn  => tag.yellow(),
        log::Level::Error => tag.red().bold()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_check_levels() {
        assert!(check_levels(&LogLevels::default()).is_ok());
        assert!(check_levels(&LogLevels {
            stdout: LevelFilter::Trace,
            file: LevelFilter::Info
        }).is_ok());

        assert!(matches!(
            check_levels(&LogLevels { stdout: LevelFilter::Warn, file: LevelFilter::Info }),
            Err(LoggerInitError::InvalidMinLogLevel("stdout", LevelFilter::Warn))
        ));
        assert!(matches!(
            check_levels(&LogLevels { stdout: LevelFilter::Debug, file: LevelFilter::Off }),
            Err(LoggerInitError::InvalidMinLogLevel("file", LevelFilter::Off))
        ));
    }

    #[test]
    fn test_file_level_below_trace_by_default() {
        let levels = LogLevels::default();

        assert!(levels.file < LevelFilter::Trace);
        assert!(levels.stdout < LevelFilter::Trace);
        assert_eq!(levels.most_verbose(), LevelFilter::Debug);
    }

    #[test]
    fn test_plain_tags_have_no_escape_codes() {
        for level in [
            log::Level::Trace, log::Level::Debug, log::Level::Info,
            log::Level::Warn, log::Level::Error
        ].iter() {
            let tag = level_tag(*level);
            assert_eq!(tag.len(), 3);
            assert!(!tag.contains('\u{1b}'));
        }
    }
}
