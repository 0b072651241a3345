//! In-memory and discarding sinks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Sink, SinkError};

/// Sink that appends lines to a buffer shared by all of its clones.
///
/// Register one clone with a logger and keep another to read back what was
/// written. Because every clone observes the same buffer, the sink is a
/// convenient capture point for tests and for embedders that forward log
/// output to their own UI.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    /// Creates an empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    /// Returns the captured text and clears the buffer.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.lock())
    }

    /// Number of newline-terminated lines captured so far.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lock().matches('\n').count()
    }

    /// Reports whether any captured text contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().contains(needle)
    }
}

impl Sink for MemorySink {
    fn log(&mut self, line: &str) -> Result<(), SinkError> {
        self.lock().push_str(line);
        Ok(())
    }
}

/// Sink that accepts and discards every line.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    #[inline]
    fn log(&mut self, _line: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_buffer() {
        let capture = MemorySink::new();
        let mut writer = capture.clone();

        writer.log("alpha\n").expect("write succeeds");
        writer.log("beta\n").expect("write succeeds");

        assert_eq!(capture.contents(), "alpha\nbeta\n");
        assert_eq!(capture.line_count(), 2);
        assert!(capture.contains("beta"));
    }

    #[test]
    fn take_drains_the_buffer() {
        let capture = MemorySink::new();
        capture.clone().log("once\n").expect("write succeeds");

        assert_eq!(capture.take(), "once\n");
        assert!(capture.contents().is_empty());
        assert_eq!(capture.line_count(), 0);
    }

    #[test]
    fn null_sink_never_fails() {
        let mut sink = NullSink;
        for _ in 0..3 {
            sink.log("ignored\n").expect("null sink accepts everything");
        }
    }
}
