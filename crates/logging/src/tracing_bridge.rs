//! crates/logging/src/tracing_bridge.rs
//! Bridge from the tracing crate into a [`Logger`].
//!
//! [`LoggerLayer`] is a tracing-subscriber layer that turns every tracing
//! event into a line of the target logger, so libraries instrumented with
//! `tracing` share the sinks, formatter and level registry of the host.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::init_tracing;
//!
//! init_tracing();
//! tracing::warn!(peer = %addr, "handshake timed out");
//! ```

use std::fmt::{self, Write as _};

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::{Callsite, Level, Logger, Record};

/// A tracing layer forwarding events to a [`Logger`].
///
/// The event target becomes the callsite function and the event's file and
/// line become the callsite location, so patterns registered on the logger
/// filter tracing events by source file exactly like native lines. Fields
/// other than `message` are appended as `key=value`.
#[derive(Clone, Copy, Debug)]
pub struct LoggerLayer {
    logger: &'static Logger,
}

impl LoggerLayer {
    /// Creates a layer writing to `logger`.
    #[must_use]
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }

    /// Map a tracing level to a logger level.
    #[must_use]
    pub fn level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl Default for LoggerLayer {
    fn default() -> Self {
        Self::new(Logger::global())
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::level(metadata.level());
        let file = metadata.file();

        if !self.logger.shown(level, file.unwrap_or("")) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let callsite = Callsite {
            file,
            line: metadata.line().unwrap_or(0),
            function: Some(metadata.target()),
            condition: None,
        };
        self.logger
            .log_line(&Record::new(level, callsite), &visitor.finish());
    }
}

/// Visitor collecting the message and the remaining fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={value}", field.name());
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Installs a [`LoggerLayer`] for the global logger as the global tracing
/// subscriber.
///
/// # Panics
///
/// Panics if a global tracing subscriber is already installed.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::default())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySink;
    use tracing_subscriber::layer::SubscriberExt;

    fn leaked_logger(level: Level) -> (&'static Logger, MemorySink) {
        let logger: &'static Logger = Box::leak(Box::new(Logger::new()));
        let sink = MemorySink::new();
        logger.add_sink(sink.clone());
        logger.reset_levels(level);
        (logger, sink)
    }

    #[test]
    fn level_mapping() {
        assert_eq!(LoggerLayer::level(&tracing::Level::ERROR), Level::Error);
        assert_eq!(LoggerLayer::level(&tracing::Level::WARN), Level::Warning);
        assert_eq!(LoggerLayer::level(&tracing::Level::INFO), Level::Info);
        assert_eq!(LoggerLayer::level(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(LoggerLayer::level(&tracing::Level::TRACE), Level::Trace);
    }

    #[test]
    fn events_reach_logger_with_fields() {
        let (logger, sink) = leaked_logger(Level::Info);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "net::accept", peer = "10.0.0.7", "connection accepted");
            tracing::debug!(target: "net::accept", "hidden");
        });

        let output = sink.contents();
        assert!(output.contains("[NFO]"), "{output}");
        assert!(output.contains("[net::accept] connection accepted peer=10.0.0.7\n"));
        assert!(!output.contains("hidden"));
        assert_eq!(sink.line_count(), 1);
    }

    #[test]
    fn file_patterns_apply_to_events() {
        let (logger, sink) = leaked_logger(Level::Error);
        logger.set_level(Level::Debug, "-;tracing_bridge.rs");
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(count = 3, "matched");
        });

        assert!(sink.contains("] matched count=3\n"));
    }
}
