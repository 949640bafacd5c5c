#![deny(missing_docs)]
//! Shared logging utilities for the scroll workspace.
//!
//! This crate provides the `scroll_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is
//! prefixed with the layout pass currently being reconciled on this thread, so
//! a trigger or offset correction can be traced back to the geometry event
//! that caused it.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the current layout pass number.
    static LAYOUT_PASS: Cell<u64> = const { Cell::new(0) };
}

/// Sets the layout pass number for the current thread.
/// Drivers call this once per observed geometry snapshot.
pub fn set_layout_pass(pass: u64) {
    LAYOUT_PASS.with(|v| v.set(pass));
}

/// Advances the layout pass number for the current thread and returns the new value.
pub fn next_layout_pass() -> u64 {
    LAYOUT_PASS.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the layout pass number for the current thread.
/// Returns 0 if no pass has been recorded.
pub fn layout_pass() -> u64 {
    LAYOUT_PASS.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current layout pass.
#[macro_export]
macro_rules! scroll_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[pass {}] {}", $crate::layout_pass(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current layout pass.
#[macro_export]
macro_rules! scroll_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[pass {}] {}", $crate::layout_pass(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current layout pass.
#[macro_export]
macro_rules! scroll_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[pass {}] {}", $crate::layout_pass(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current layout pass.
#[macro_export]
macro_rules! scroll_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[pass {}] {}", $crate::layout_pass(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current layout pass.
#[macro_export]
macro_rules! scroll_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[pass {}] {}", $crate::layout_pass(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so state transitions show up in failing test output.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
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
