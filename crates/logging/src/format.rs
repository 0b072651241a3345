//! crates/logging/src/format.rs
//! Line metadata and the formatter contract.

use std::error::Error;
use std::fmt::Write as _;
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};
use time::macros::format_description;

use crate::Level;

/// Static description of the place a log line comes from.
///
/// Built by the logging macros from `file!()`, `line!()` and `module_path!()`;
/// `condition` carries the stringified expression of a conditional log form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Callsite {
    /// Source file, when known.
    pub file: Option<&'static str>,
    /// Source line; meaningful only together with `file`.
    pub line: u32,
    /// Enclosing function or module path, when known.
    pub function: Option<&'static str>,
    /// Text of the condition that triggered the line, when any.
    pub condition: Option<&'static str>,
}

impl Callsite {
    /// Describes `file:line` inside `function`.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file: Some(file),
            line,
            function: Some(function),
            condition: None,
        }
    }

    /// Callsite without any source information.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            file: None,
            line: 0,
            function: None,
            condition: None,
        }
    }

    /// Attaches the text of a triggering condition.
    #[must_use]
    pub const fn with_condition(mut self, condition: &'static str) -> Self {
        self.condition = Some(condition);
        self
    }

    /// File name used for pattern matching; empty when unknown.
    #[must_use]
    pub fn file_or_empty(&self) -> &'static str {
        self.file.unwrap_or("")
    }
}

/// Metadata a formatter renders alongside the message text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    /// Level the line was logged at.
    pub level: Level,
    /// Where the line was logged from.
    pub callsite: Callsite,
}

impl Record {
    /// Bundles a level with its callsite.
    #[must_use]
    pub const fn new(level: Level, callsite: Callsite) -> Self {
        Self { level, callsite }
    }
}

/// Renders messages and error values into the text sinks receive.
///
/// Exactly one formatter is active per [`Logger`](crate::Logger); installing
/// a new one replaces it atomically.
pub trait Formatter: Send {
    /// Renders `line` logged from `record` on the thread with index `thread`.
    ///
    /// The result is handed to every sink unchanged, so it must include the
    /// line terminator.
    fn format(&self, line: &str, thread: usize, record: &Record) -> String;

    /// Renders an error value appended to a handle or raised by a sink.
    fn format_error(&self, error: &dyn Error) -> String;
}

/// Clock used for the timestamp field of [`DefaultFormatter`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeZone {
    /// Coordinated universal time, rendered without an offset.
    Utc,
    /// Local time, rendered with its numeric UTC offset.
    ///
    /// The offset is read from the system once per process and reused for
    /// every later line, so a daylight-saving change during the run is not
    /// picked up. On Unix the offset can only be read while the process is
    /// single-threaded; [`DefaultFormatter::local`] and [`Logger::new`]
    /// capture it, so create the logger before spawning threads. If it was
    /// never captured, lines are stamped in UTC with a `+0000` offset.
    ///
    /// [`Logger::new`]: crate::Logger::new
    #[default]
    Local,
}

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Cached local offset, read from the system on the first successful call.
fn local_offset() -> UtcOffset {
    if let Some(offset) = LOCAL_OFFSET.get() {
        return *offset;
    }
    UtcOffset::current_local_offset().map_or(UtcOffset::UTC, |offset| {
        *LOCAL_OFFSET.get_or_init(|| offset)
    })
}

/// Built-in formatter.
///
/// Produces
/// `[<timestamp>][<thread>][<TAG>][<file>:<line>][<function>][<condition>] <message>`
/// followed by a newline. The file, function and condition fields are
/// omitted when the callsite does not provide them.
///
/// # Examples
///
/// ```
/// use logging::{Callsite, DefaultFormatter, Formatter, Level, Record, TimeZone};
///
/// let formatter = DefaultFormatter::new(TimeZone::Utc);
/// let record = Record::new(Level::Info, Callsite::new("src/app.rs", 7, "app::run"));
/// let line = formatter.format("ready", 0, &record);
///
/// assert!(line.ends_with("][0][NFO][src/app.rs:7][app::run] ready\n"));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFormatter {
    zone: TimeZone,
}

impl DefaultFormatter {
    /// Creates a formatter stamping lines in `zone`.
    #[must_use]
    pub const fn new(zone: TimeZone) -> Self {
        Self { zone }
    }

    /// Formatter stamping lines in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::new(TimeZone::Utc)
    }

    /// Formatter stamping lines in local time.
    ///
    /// Captures the process-wide local offset if it has not been read yet.
    #[must_use]
    pub fn local() -> Self {
        local_offset();
        Self::new(TimeZone::Local)
    }

    /// Returns the configured clock.
    #[must_use]
    pub const fn zone(&self) -> TimeZone {
        self.zone
    }

    /// Renders the current time as `YYYY-MM-DD HH:MM:SS.mmm (Day)` for UTC or
    /// `YYYY-MM-DD HH:MM:SS.mmm +HHMM (Day)` for local time.
    ///
    /// Local time uses the offset captured for the process; see
    /// [`TimeZone::Local`].
    #[must_use]
    pub fn timestamp(zone: TimeZone) -> String {
        let rendered = match zone {
            TimeZone::Utc => OffsetDateTime::now_utc().format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3] ([weekday repr:short])"
            )),
            TimeZone::Local => OffsetDateTime::now_utc()
                .to_offset(local_offset())
                .format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3] [offset_hour sign:mandatory][offset_minute] ([weekday repr:short])"
                )),
        };

        rendered.unwrap_or_else(|_| OffsetDateTime::now_utc().unix_timestamp().to_string())
    }
}

impl Formatter for DefaultFormatter {
    fn format(&self, line: &str, thread: usize, record: &Record) -> String {
        let callsite = &record.callsite;
        let mut out = String::with_capacity(line.len() + 96);

        let _ = write!(
            out,
            "[{}][{thread}][{}]",
            Self::timestamp(self.zone),
            record.level.tag()
        );
        if let Some(file) = callsite.file {
            let _ = write!(out, "[{file}:{}]", callsite.line);
        }
        if let Some(function) = callsite.function {
            let _ = write!(out, "[{function}]");
        }
        if let Some(condition) = callsite.condition {
            let _ = write!(out, "[{condition}]");
        }
        out.push(' ');
        out.push_str(line);
        out.push('\n');
        out
    }

    fn format_error(&self, error: &dyn Error) -> String {
        let mut rendered = format!("Error: {error}");
        let mut source = error.source();

        while let Some(cause) = source {
            let text = cause.to_string();
            if !rendered.contains(&text) {
                rendered.push_str(": ");
                rendered.push_str(&text);
            }
            source = cause.source();
        }

        rendered
    }
}
