#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `scribe` is the facade of the scribe logging workspace. It re-exports the
//! core pipeline from the [`logging`] crate, including the stock sinks it
//! takes from `logging-sink`, so embedding programs depend on a single crate.
//!
//! # Examples
//!
//! ```
//! use scribe::{Level, Logger, MemorySink, log_to};
//!
//! let logger = Logger::new();
//! let capture = MemorySink::new();
//! logger.add_sink(capture.clone());
//! logger.apply_settings("resetLevels: Info\n");
//!
//! log_to!(&logger, Level::Info, "cache warmed in", 42, "ms");
//! assert!(capture.contains("cache warmed in 42 ms"));
//! ```

pub use logging::*;
