#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the output end of the scribe logging pipeline: a
//! small [`Sink`] contract plus the stock destinations every embedding needs
//! (standard error, standard output, append-only files, and an in-memory
//! capture buffer). Sinks receive lines that have already been rendered by a
//! formatter, so they never inspect levels or metadata.
//!
//! # Design
//!
//! [`Sink::log`] takes the fully formatted line, newline included, and either
//! writes all of it or reports a [`SinkError`]. The dispatcher in the
//! `logging` crate owns every registered sink exclusively (`Box<dyn Sink>`),
//! so implementations only need to be [`Send`]. [`Sink::type_name`] identifies
//! a failing sink in the diagnostic line the dispatcher broadcasts after
//! removing it.
//!
//! # Invariants
//!
//! - Stream-backed sinks flush after every line so that a process that
//!   terminates abruptly (for example after a fatal log line) still leaves
//!   every accepted line on disk.
//! - [`FileSink::open`] fails immediately when the target cannot be opened for
//!   appending, and the error message names the attempted path.
//!
//! # Examples
//!
//! Capture lines in memory and inspect them:
//!
//! ```
//! use logging_sink::{MemorySink, Sink};
//!
//! let capture = MemorySink::new();
//! let mut sink = capture.clone();
//! sink.log("first\n")?;
//! sink.log("second\n")?;
//!
//! assert_eq!(capture.line_count(), 2);
//! assert!(capture.contents().ends_with("second\n"));
//! # Ok::<(), logging_sink::SinkError>(())
//! ```

mod error;
mod memory;
mod sink;
mod stream;

pub use error::SinkError;
pub use memory::{MemorySink, NullSink};
pub use sink::Sink;
pub use stream::{FileSink, StdErrSink, StdOutSink, StreamSink};
