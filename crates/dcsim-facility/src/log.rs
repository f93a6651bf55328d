//! Logging facilities.
//!
//! Log records are emitted through the `log` facade with the component name as a target
//! and the simulated time as a prefix, so the host decides where they go (e.g. via `env_logger`).

use atty::Stream;
use chrono::NaiveDateTime;
use colored::{Color, ColoredString, Colorize};

/// Applies the color to the string if stderr (log) goes to console.
pub fn get_colored(s: &str, color: Color) -> ColoredString {
    if atty::is(Stream::Stderr) {
        s.color(color)
    } else {
        s.normal()
    }
}

/// Identifies the simulation component emitting log records and the current simulated time.
#[derive(Clone, Debug)]
pub struct LogContext {
    name: &'static str,
    time: NaiveDateTime,
}

impl LogContext {
    /// Creates a context for the given component at the given simulated time.
    pub fn new(name: &'static str, time: NaiveDateTime) -> Self {
        Self { name, time }
    }

    /// Returns the component name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the simulated time.
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_record {
    ($level:ident, $label:literal, $color:ident, $ctx:expr, $format:literal $(, $arg:expr)* $(,)?) => (
        log::$level!(
            target: $ctx.name(),
            concat!("[{} {} {}] ", $format),
            $ctx.time(), $crate::log::get_colored($label, $crate::colored::Color::$color), $ctx.name() $(, $arg)*
        )
    );
    ($level:ident, $label:literal, $color:ident, $ctx:expr, $msg:expr) => (
        $crate::log_record!($level, $label, $color, $ctx, "{}", $msg)
    );
}

/// Logs a message at the info level.
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use chrono::NaiveDateTime;
/// use env_logger::Builder;
/// use dcsim_facility::log::LogContext;
/// use dcsim_facility::log_info;
///
/// Builder::from_default_env()
///     .format(|buf, record| writeln!(buf, "{}", record.args()))
///     .init();
///
/// let ctx = LogContext::new("engine", NaiveDateTime::default());
/// log_info!(ctx, "started");
/// log_info!(ctx, "{} accelerators", 8);
/// ```
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_record!(info, "INFO ", Green, $ctx, $($arg)+));
}

/// Logs a message at the debug level.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_record!(debug, "DEBUG", Blue, $ctx, $($arg)+));
}

/// Logs a message at the trace level.
#[macro_export]
macro_rules! log_trace {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_record!(trace, "TRACE", Cyan, $ctx, $($arg)+));
}

/// Logs a message at the warn level.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_record!(warn, "WARN ", Yellow, $ctx, $($arg)+));
}

/// Logs a message at the error level.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_record!(error, "ERROR", Red, $ctx, $($arg)+));
}
