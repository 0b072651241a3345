//! crates/logging/src/handle.rs
//! Per-call message accumulator that flushes when dropped.

use std::error::Error;
use std::mem;
use std::ops::Shl;
use std::panic::{self, AssertUnwindSafe};
use std::process;

use crate::{Callsite, Level, LogValue, Logger, Record};

/// Accumulates one log line and hands it to its [`Logger`] when dropped.
///
/// A handle is created per log statement, usually by one of the logging
/// macros, and never crosses threads. Appending takes no lock; the logger is
/// only consulted for the spacing mode and, at flush time, for dispatch.
///
/// Dropping the handle flushes it: a non-empty message is formatted and
/// written to every sink, and an empty one is discarded. Any panic raised
/// while flushing is swallowed so logging can never unwind out of a drop. A
/// handle at [`Level::Fatal`] always flushes, even with an empty message, and
/// then aborts the process.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, MemorySink, callsite};
///
/// let logger = Logger::new();
/// let capture = MemorySink::new();
/// logger.add_sink(capture.clone());
///
/// let _ = logger.handle(Level::Error, callsite!()) << "retry" << 3 << "of" << 5;
/// assert!(capture.contains("] retry 3 of 5\n"));
/// ```
pub struct Handle<'a> {
    logger: &'a Logger,
    record: Record,
    enabled: bool,
    flushed: bool,
    buffer: String,
}

impl<'a> Handle<'a> {
    /// Starts an empty line at `level` from `callsite`.
    pub fn new(logger: &'a Logger, level: Level, callsite: Callsite) -> Self {
        Self::conditional(logger, level, callsite, true)
    }

    /// Starts a line that is only written when `enabled` holds.
    ///
    /// A disabled handle ignores appended values and writes nothing, except
    /// at [`Level::Fatal`], which always flushes and terminates.
    ///
    /// The logger's settings file is checked first, so spacing and level
    /// changes it carries already apply to the values appended to this line.
    pub fn conditional(logger: &'a Logger, level: Level, callsite: Callsite, enabled: bool) -> Self {
        logger.check_settings();
        Self {
            logger,
            record: Record::new(level, callsite),
            enabled,
            flushed: false,
            buffer: String::new(),
        }
    }

    /// Level of the line.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.record.level
    }

    /// Level and callsite of the line.
    #[must_use]
    pub const fn record(&self) -> &Record {
        &self.record
    }

    /// Message accumulated so far.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.buffer
    }

    /// Reports whether the line will be written when dropped.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled || matches!(self.record.level, Level::Fatal)
    }

    /// Appends `value`, separated from the previous value by a space when
    /// the logger pads.
    pub fn append<T: LogValue>(&mut self, value: T) -> &mut Self {
        if self.is_enabled() {
            self.separate();
            value.render(&mut self.buffer);
        }
        self
    }

    /// Appends `error` as rendered by the logger's formatter.
    pub fn append_error(&mut self, error: &dyn Error) -> &mut Self {
        if self.is_enabled() {
            let text = self.logger.format_error(error);
            self.separate();
            self.buffer.push_str(&text);
        }
        self
    }

    /// Logs `"<flow>: <expression> => <value>"` as its own line at the
    /// handle's level and returns `value`.
    ///
    /// Used by [`trace_eval!`](crate::trace_eval) to observe the value of a
    /// branch or loop condition without changing control flow.
    pub fn log_expression<T: LogValue>(&self, flow: &str, expression: &str, value: T) -> T {
        if self.is_enabled() {
            let mut line = format!("{flow}: {expression} => ");
            value.render(&mut line);
            self.logger.log_line(&self.record, &line);
        }
        value
    }

    /// Writes the accumulated line now instead of at the end of scope.
    pub fn flush(mut self) {
        self.dispatch();
    }

    fn separate(&mut self) {
        if !self.buffer.is_empty() && self.logger.spacing().pads() {
            self.buffer.push(' ');
        }
    }

    fn dispatch(&mut self) {
        if mem::replace(&mut self.flushed, true) {
            return;
        }

        let message = mem::take(&mut self.buffer);
        let fatal = self.record.level == Level::Fatal;

        if fatal || (self.enabled && !message.is_empty()) {
            self.logger.log_line(&self.record, &message);
        }
    }
}

impl<T: LogValue> Shl<T> for Handle<'_> {
    type Output = Self;

    fn shl(mut self, value: T) -> Self::Output {
        self.append(value);
        self
    }
}

impl Drop for Handle<'_> {
    fn drop(&mut self) {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch()));

        if self.record.level == Level::Fatal {
            process::abort();
        }
    }
}

impl std::fmt::Debug for Handle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("record", &self.record)
            .field("enabled", &self.enabled)
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySink, Spacing, callsite};
    use std::fs;
    use std::io;
    use std::time::Duration;

    fn capture() -> (Logger, MemorySink) {
        let logger = Logger::new();
        let sink = MemorySink::new();
        logger.add_sink(sink.clone());
        logger.reset_levels(Level::Trace);
        (logger, sink)
    }

    #[test]
    fn values_are_padded_by_default() {
        let (logger, sink) = capture();
        logger.handle(Level::Info, callsite!()).append("test").append(5);
        assert!(sink.contains("] test 5\n"));
    }

    #[test]
    fn as_is_spacing_concatenates() {
        let (logger, sink) = capture();
        logger.set_spacing(Spacing::AsIs);
        logger.handle(Level::Info, callsite!()).append("test").append(5);
        assert!(sink.contains("] test5\n"));
    }

    #[test]
    fn empty_handle_writes_nothing() {
        let (logger, sink) = capture();
        drop(logger.handle(Level::Error, callsite!()));
        assert_eq!(sink.line_count(), 0);
    }

    #[test]
    fn explicit_flush_writes_once() {
        let (logger, sink) = capture();
        let mut handle = logger.handle(Level::Warning, callsite!());
        handle.append("early");
        assert_eq!(handle.message(), "early");
        handle.flush();
        assert_eq!(sink.line_count(), 1);
    }

    #[test]
    fn disabled_handle_ignores_values() {
        let (logger, sink) = capture();
        let mut handle = logger.handle(Level::Error, callsite!());
        handle.append("kept");
        drop(handle);

        let mut skipped = Handle::conditional(&logger, Level::Error, callsite!(), false);
        skipped.append("skipped");
        assert_eq!(skipped.message(), "");
        drop(skipped);

        assert_eq!(sink.line_count(), 1);
        assert!(!sink.contains("skipped"));
    }

    #[test]
    fn errors_render_through_formatter() {
        let (logger, sink) = capture();
        let error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        logger
            .handle(Level::Error, callsite!())
            .append("open failed:")
            .append_error(&error);
        assert!(sink.contains("] open failed: Error: denied\n"));
    }

    #[test]
    fn expression_is_logged_and_returned() {
        let (logger, sink) = capture();
        let handle = logger.handle(Level::Trace, callsite!());
        let value = handle.log_expression("if", "count > 2", 3 > 2);
        drop(handle);

        assert!(value);
        assert!(sink.contains("] if: count > 2 => true\n"));
        assert_eq!(sink.line_count(), 1);
    }

    #[test]
    fn shift_operator_chains() {
        let (logger, sink) = capture();
        let _ = logger.handle(Level::Debug, callsite!()) << "a" << 'b' << 1.5_f64;
        assert!(sink.contains("] a b 1.5\n"));
    }

    #[test]
    fn settings_apply_before_values_are_appended() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.txt");
        fs::write(&path, "noPad\n").expect("write settings");

        let (logger, sink) = capture();
        logger.set_settings_file(&path, Duration::from_secs(60));
        logger.handle(Level::Info, callsite!()).append("test").append(5);

        assert_eq!(logger.spacing(), Spacing::AsIs);
        assert!(sink.contains("] test5\n"), "{}", sink.contents());
    }
}
