#![deny(missing_docs)]
//! Shared logging utilities for the autofill workspace.
//!
//! Log lines from the `autofill_*` macros are prefixed with the current
//! page-session tag, so interleaved output from several sessions (and
//! from their timer threads) stays attributable.

use std::cell::Cell;
use std::fmt;

thread_local! {
    /// Thread-local storage for the current page-session tag.
    static SESSION_TAG: Cell<u64> = const { Cell::new(0) };
}

/// Sets the page-session tag for the current thread.
/// The session runtime calls this once when a page session starts.
pub fn set_session_tag(tag: u64) {
    SESSION_TAG.with(|v| v.set(tag));
}

/// Retrieves the page-session tag for the current thread.
/// Returns 0 if no session has been tagged.
pub fn get_session_tag() -> u64 {
    SESSION_TAG.with(|v| v.get())
}

/// Renders a log line with the current thread's session-tag prefix.
/// Untagged threads (tag 0) log the message bare.
pub fn with_session_tag(args: fmt::Arguments<'_>) -> String {
    match get_session_tag() {
        0 => args.to_string(),
        tag => format!("s{tag} | {args}"),
    }
}

/// Logs a trace-level message tagged with the current session.
#[macro_export]
macro_rules! autofill_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}", $crate::with_session_tag(format_args!($($arg)*)));
    }};
}

/// Logs an info-level message tagged with the current session.
#[macro_export]
macro_rules! autofill_info {
    ($($arg:tt)*) => {{
        log::info!("{}", $crate::with_session_tag(format_args!($($arg)*)));
    }};
}

/// Logs a debug-level message tagged with the current session.
#[macro_export]
macro_rules! autofill_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}", $crate::with_session_tag(format_args!($($arg)*)));
    }};
}

/// Logs a warn-level message tagged with the current session.
#[macro_export]
macro_rules! autofill_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}", $crate::with_session_tag(format_args!($($arg)*)));
    }};
}

/// Logs an error-level message tagged with the current session.
#[macro_export]
macro_rules! autofill_error {
    ($($arg:tt)*) => {{
        log::error!("{}", $crate::with_session_tag(format_args!($($arg)*)));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
