use crate::SinkError;

/// Destination for fully formatted log lines.
///
/// Implementations write `line` exactly as given; the formatter has already
/// appended the line terminator. Returning an error (or panicking) causes the
/// dispatcher to drop the sink from its registry and to report the failure to
/// the remaining sinks, so an implementation never needs to retry internally.
///
/// # Examples
///
/// ```
/// use logging_sink::{Sink, SinkError};
///
/// struct Counter(usize);
///
/// impl Sink for Counter {
///     fn log(&mut self, _line: &str) -> Result<(), SinkError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut sink = Counter(0);
/// sink.log("hello\n")?;
/// assert_eq!(sink.0, 1);
/// assert!(sink.type_name().ends_with("Counter"));
/// # Ok::<(), SinkError>(())
/// ```
pub trait Sink: Send {
    /// Writes one formatted line.
    fn log(&mut self, line: &str) -> Result<(), SinkError>;

    /// Name of the concrete sink type, used when reporting its failure.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
