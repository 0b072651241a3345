//! crates/logging-sink/src/stream.rs
//! Sinks backed by [`io::Write`] streams: stderr, stdout and append-only files.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{Sink, SinkError};

/// Sink that writes every line to an [`io::Write`] implementor and flushes it.
///
/// The `name` is only used in error messages so that a failure can be traced
/// back to the destination (`stderr`, `stdout`, or the file path).
///
/// # Examples
///
/// ```
/// use logging_sink::{Sink, StreamSink};
///
/// let mut sink = StreamSink::new(Vec::new(), "buffer");
/// sink.log("ready\n")?;
/// assert_eq!(sink.get_ref(), b"ready\n");
/// # Ok::<(), logging_sink::SinkError>(())
/// ```
pub struct StreamSink<W> {
    writer: W,
    name: String,
}

impl<W> StreamSink<W> {
    /// Wraps `writer`, reporting failures under `name`.
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    /// Returns the destination name used in error messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> fmt::Debug for StreamSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSink")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<W> Sink for StreamSink<W>
where
    W: Write + Send,
{
    fn log(&mut self, line: &str) -> Result<(), SinkError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|source| SinkError::write(self.name.as_str(), source))
    }
}

/// Sink writing to the process's standard error stream.
///
/// This is the fallback destination the dispatcher installs whenever its sink
/// registry would otherwise be empty.
#[derive(Debug)]
pub struct StdErrSink(StreamSink<io::Stderr>);

impl StdErrSink {
    /// Creates a sink bound to [`io::stderr`].
    #[must_use]
    pub fn new() -> Self {
        Self(StreamSink::new(io::stderr(), "stderr"))
    }
}

impl Default for StdErrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdErrSink {
    fn log(&mut self, line: &str) -> Result<(), SinkError> {
        self.0.log(line)
    }
}

/// Sink writing to the process's standard output stream.
#[derive(Debug)]
pub struct StdOutSink(StreamSink<io::Stdout>);

impl StdOutSink {
    /// Creates a sink bound to [`io::stdout`].
    #[must_use]
    pub fn new() -> Self {
        Self(StreamSink::new(io::stdout(), "stdout"))
    }
}

impl Default for StdOutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdOutSink {
    fn log(&mut self, line: &str) -> Result<(), SinkError> {
        self.0.log(line)
    }
}

/// Sink appending every line to a file.
///
/// The file is created when missing and is never truncated.
#[derive(Debug)]
pub struct FileSink {
    inner: StreamSink<File>,
    path: PathBuf,
}

impl FileSink {
    /// Opens `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] naming `path` when the file cannot be
    /// opened, for example because a parent directory does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::FileSink;
    ///
    /// let error = FileSink::open("does/not/exist/log.txt").unwrap_err();
    /// assert!(error.to_string().contains("does/not/exist/log.txt"));
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::open(path, source))?;

        Ok(Self {
            inner: StreamSink::new(file, path.display().to_string()),
            path: path.to_path_buf(),
        })
    }

    /// Returns the path this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn log(&mut self, line: &str) -> Result<(), SinkError> {
        self.inner.log(line)
    }
}
