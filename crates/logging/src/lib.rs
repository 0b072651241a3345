#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the core of the scribe logging library: an embeddable,
//! thread-safe pipeline that routes one formatted line per log statement to a
//! set of pluggable sinks. Which lines are written is decided per level and
//! per source file, and the whole configuration can be changed at runtime
//! through a watched settings file.
//!
//! # Design
//!
//! A [`Logger`] holds the configuration: the sink registry, the active
//! [`Formatter`], the [`LevelFilter`], the settings-file watcher and the
//! registry of thread indices. Each part has its own lock. Most programs use
//! [`Logger::global`] through the macros ([`log_error!`], [`log_info!`],
//! [`log_if!`], ...); libraries and tests can create isolated instances and
//! target them with [`log_to!`].
//!
//! A log statement builds a [`Handle`], appends values to it without taking
//! any lock, and writes the line when the handle is dropped. Dispatch checks
//! the settings file, consults the level registry, formats the line once and
//! hands the identical text to every sink in order.
//!
//! # Invariants
//!
//! - A line that passes the level registry reaches at least one sink: with no
//!   sink registered, a standard-error sink is installed first.
//! - A sink that fails or panics is removed, and the surviving sinks receive
//!   a `Logger[<sink type>]: <error>` line describing the failure.
//! - Lines from concurrent threads never interleave within a sink.
//! - [`Level::Fatal`] lines bypass the level registry and abort the process
//!   once written.
//!
//! # Errors
//!
//! Logging itself never reports errors to the caller. Sink failures surface
//! as [`SinkError`] values rendered into the meta-line above; settings
//! problems are logged at [`Level::Log`].
//!
//! # Examples
//!
//! ```
//! use logging::{Level, Logger, MemorySink, Spacing, log_to};
//!
//! let logger = Logger::new();
//! let capture = MemorySink::new();
//! logger.add_sink(capture.clone());
//! logger.reset_levels(Level::Debug);
//! logger.set_spacing(Spacing::AsIs);
//!
//! log_to!(&logger, Level::Debug, "retries=", 3);
//! log_to!(&logger, Level::Trace, "too detailed");
//!
//! assert!(capture.contains("] retries=3\n"));
//! assert_eq!(capture.line_count(), 1);
//! ```
//!
//! # See also
//!
//! - [`logging_sink`] for the sink contract and the stock sinks.
//! - The `tracing` feature adds `LoggerLayer`, which forwards `tracing` events
//!   into a [`Logger`].

mod filter;
mod format;
mod handle;
mod level;
mod logger;
mod macros;
mod settings;
mod spacing;
mod threads;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod value;

pub use filter::{LevelFilter, file_matches};
pub use format::{Callsite, DefaultFormatter, Formatter, Record, TimeZone};
pub use handle::Handle;
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use settings::{Command, DEFAULT_INTERVAL as DEFAULT_SETTINGS_INTERVAL, UnknownCommand};
pub use spacing::Spacing;
pub use threads::ThreadRegistry;
pub use value::{Displayed, LogValue};

pub use logging_sink::{
    FileSink, MemorySink, NullSink, Sink, SinkError, StdErrSink, StdOutSink, StreamSink,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing};
