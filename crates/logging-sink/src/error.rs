//! Error type shared by every sink implementation.

use std::io;
use std::path::PathBuf;

/// Failure reported by a [`Sink`](crate::Sink) while opening or writing.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing a line to the named destination failed.
    #[error("failed to log to '{name}': {source}")]
    Write {
        /// Human readable destination name (`stderr`, `stdout`, or a path).
        name: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file sink could not open its target for appending.
    #[error("failed to open log '{}': {source}", path.display())]
    Open {
        /// The path that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failure raised by a custom sink implementation.
    #[error("{0}")]
    Custom(String),
}

impl SinkError {
    /// Creates a [`SinkError::Write`] for the named destination.
    pub fn write(name: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            name: name.into(),
            source,
        }
    }

    /// Creates a [`SinkError::Open`] for `path`.
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Creates a [`SinkError::Custom`] carrying `message`.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_error_names_the_path() {
        let error = SinkError::open(
            "/no/such/dir/log.txt",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let display = error.to_string();
        assert!(display.contains("/no/such/dir/log.txt"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn write_error_names_the_destination() {
        let error = SinkError::write("stdout", io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert_eq!(error.to_string(), "failed to log to 'stdout': pipe");
    }

    #[test]
    fn custom_error_displays_message_verbatim() {
        assert_eq!(SinkError::custom("disk full").to_string(), "disk full");
    }
}
