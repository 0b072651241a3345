//! crates/logging/src/settings.rs
//! Settings-file watcher and the command language it carries.
//!
//! A settings file is plain text with one command per line. Blank lines are
//! ignored and surrounding whitespace is trimmed. Commands taking an argument
//! separate it from the name with `:`:
//!
//! ```text
//! clearSinks
//! addSinkStdErr
//! addSink: /var/log/app.log
//! setFormatDefaultGMT
//! resetLevels: Warning
//! setLevel: Debug=src/net/
//! noPad
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use logging_sink::{FileSink, StdErrSink, StdOutSink};

use crate::{DefaultFormatter, Level, Logger, Spacing};

/// Re-check interval used when a caller does not choose one.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// One line of a settings file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// `clearSinks`: remove every sink.
    ClearSinks,
    /// `setFormatDefault`: built-in formatter stamping local time.
    SetFormatDefault,
    /// `setFormatDefaultGMT`: built-in formatter stamping UTC.
    SetFormatDefaultGmt,
    /// `addSinkStdErr`
    AddSinkStdErr,
    /// `addSinkStdOut`
    AddSinkStdOut,
    /// `addSink:<path>`: append to a file.
    AddSink(PathBuf),
    /// `resetLevels:<level>`
    ResetLevels(Level),
    /// `pad`
    Pad,
    /// `noPad`
    NoPad,
    /// `setLevel:<level>` or `setLevel:<level>=<pattern>`
    SetLevel {
        /// Level the pattern is registered for.
        level: Level,
        /// File pattern; empty matches every file.
        pattern: String,
    },
}

/// A settings line that is not a known command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl Command {
    /// Parses one settings line. Blank lines yield `Ok(None)`.
    ///
    /// Level names are read leniently (see [`Level::from_settings_name`]), so
    /// a misspelled level falls back to `Error` instead of rejecting the line.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCommand`] carrying the trimmed line when the command
    /// name is not recognized or a required argument is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Command, Level};
    ///
    /// assert_eq!(
    ///     Command::parse("  setLevel: Debug=net/ ").unwrap(),
    ///     Some(Command::SetLevel { level: Level::Debug, pattern: "net/".into() })
    /// );
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// assert!(Command::parse("explode").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, UnknownCommand> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, argument) = match line.split_once(':') {
            Some((name, argument)) => (name.trim_end(), Some(argument.trim())),
            None => (line, None),
        };

        let command = match (name, argument) {
            ("clearSinks", None) => Self::ClearSinks,
            ("setFormatDefault", None) => Self::SetFormatDefault,
            ("setFormatDefaultGMT", None) => Self::SetFormatDefaultGmt,
            ("addSinkStdErr", None) => Self::AddSinkStdErr,
            ("addSinkStdOut", None) => Self::AddSinkStdOut,
            ("pad", None) => Self::Pad,
            ("noPad", None) => Self::NoPad,
            ("addSink", Some(path)) if !path.is_empty() => Self::AddSink(PathBuf::from(path)),
            ("resetLevels", Some(level)) => Self::ResetLevels(Level::from_settings_name(level)),
            ("setLevel", Some(assignment)) => {
                let (level, pattern) = assignment.split_once('=').unwrap_or((assignment, ""));
                Self::SetLevel {
                    level: Level::from_settings_name(level),
                    pattern: pattern.trim().to_owned(),
                }
            }
            _ => return Err(UnknownCommand(line.to_owned())),
        };

        Ok(Some(command))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClearSinks => f.write_str("clearSinks"),
            Self::SetFormatDefault => f.write_str("setFormatDefault"),
            Self::SetFormatDefaultGmt => f.write_str("setFormatDefaultGMT"),
            Self::AddSinkStdErr => f.write_str("addSinkStdErr"),
            Self::AddSinkStdOut => f.write_str("addSinkStdOut"),
            Self::AddSink(path) => write!(f, "addSink:{}", path.display()),
            Self::ResetLevels(level) => write!(f, "resetLevels:{}", level.name()),
            Self::Pad => f.write_str("pad"),
            Self::NoPad => f.write_str("noPad"),
            Self::SetLevel { level, pattern } if pattern.is_empty() => {
                write!(f, "setLevel:{}", level.name())
            }
            Self::SetLevel { level, pattern } => write!(f, "setLevel:{}={pattern}", level.name()),
        }
    }
}

/// Watch state for the settings file of one [`Logger`].
#[derive(Debug)]
pub(crate) struct SettingsFile {
    path: Option<PathBuf>,
    interval: Duration,
    last_check: Option<Instant>,
    applied: Option<String>,
    announced: bool,
}

/// Work found by [`SettingsFile::poll`], performed without the settings lock.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Pending {
    pub(crate) announce: Option<PathBuf>,
    pub(crate) contents: Option<String>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            path: None,
            interval: DEFAULT_INTERVAL,
            last_check: None,
            applied: None,
            announced: false,
        }
    }
}

impl SettingsFile {
    /// Points the watcher at `path`; an empty path disables it.
    ///
    /// The clock is reset so the next poll reads the file. A new path forgets
    /// the previously applied contents and is announced again.
    pub(crate) fn watch(&mut self, path: &Path, interval: Duration) {
        let path = (!path.as_os_str().is_empty()).then(|| path.to_path_buf());

        if path != self.path {
            self.applied = None;
            self.announced = false;
        }
        self.path = path;
        self.interval = interval;
        self.last_check = None;
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Checks the file if the interval has elapsed.
    ///
    /// Returns contents only when they differ from the last applied text; the
    /// cache is updated before returning so concurrent or nested polls never
    /// apply the same document twice. A missing or unreadable file counts as
    /// unchanged.
    pub(crate) fn poll(&mut self, now: Instant) -> Pending {
        let Some(path) = self.path.as_ref() else {
            return Pending::default();
        };
        if self
            .last_check
            .is_some_and(|last| now.saturating_duration_since(last) < self.interval)
        {
            return Pending::default();
        }
        self.last_check = Some(now);

        let announce = (!self.announced).then(|| path.clone());
        self.announced = true;

        let contents = match fs::read_to_string(path) {
            Ok(contents) if self.applied.as_deref() != Some(contents.as_str()) => {
                self.applied = Some(contents.clone());
                Some(contents)
            }
            _ => None,
        };

        Pending { announce, contents }
    }
}

impl Logger {
    /// Applies a settings document as if it had been read from the watched
    /// file.
    ///
    /// Every command is applied in order. Confirmation lines, failures to
    /// open file sinks and unknown commands are then logged at [`Level::Log`],
    /// after the whole document took effect, so they reach the sinks it
    /// configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::{Level, Logger};
    ///
    /// let logger = Logger::new();
    /// logger.apply_settings("resetLevels: Info\nsetLevel: Trace=-;net/\n");
    ///
    /// assert!(logger.shown(Level::Trace, "src/net/tcp.rs"));
    /// assert!(!logger.shown(Level::Trace, "src/main.rs"));
    /// assert!(logger.shown(Level::Info, "src/main.rs"));
    /// ```
    pub fn apply_settings(&self, text: &str) {
        let reports: Vec<String> = text
            .lines()
            .filter_map(|line| match Command::parse(line) {
                Ok(None) => None,
                Ok(Some(command)) => Some(self.apply_command(&command)),
                Err(unknown) => Some(unknown.to_string()),
            })
            .collect();

        for report in reports {
            self.log_internal(Level::Log, &report);
        }
    }

    /// Applies one command and returns the line reporting its outcome.
    pub fn apply_command(&self, command: &Command) -> String {
        match command {
            Command::ClearSinks => self.clear_sinks(),
            Command::SetFormatDefault => {
                self.set_formatter(DefaultFormatter::local());
            }
            Command::SetFormatDefaultGmt => {
                self.set_formatter(DefaultFormatter::utc());
            }
            Command::AddSinkStdErr => self.add_sink(StdErrSink::new()),
            Command::AddSinkStdOut => self.add_sink(StdOutSink::new()),
            Command::AddSink(path) => match FileSink::open(path) {
                Ok(sink) => self.add_sink(sink),
                Err(error) => {
                    return format!("Logger: {command} failed: {}", self.format_error(&error));
                }
            },
            Command::ResetLevels(level) => self.reset_levels(*level),
            Command::Pad => self.set_spacing(Spacing::Pad),
            Command::NoPad => self.set_spacing(Spacing::AsIs),
            Command::SetLevel { level, pattern } => self.set_level(*level, pattern),
        }

        format!("Logger: {command}")
    }

    /// Path of the watched settings file, if any.
    #[must_use]
    pub fn settings_file(&self) -> Option<PathBuf> {
        self.settings_state().path().map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_every_command() {
        let cases = [
            ("clearSinks", Command::ClearSinks),
            ("setFormatDefault", Command::SetFormatDefault),
            ("setFormatDefaultGMT", Command::SetFormatDefaultGmt),
            ("addSinkStdErr", Command::AddSinkStdErr),
            ("addSinkStdOut", Command::AddSinkStdOut),
            ("addSink: logs/app.log", Command::AddSink("logs/app.log".into())),
            ("resetLevels: Log", Command::ResetLevels(Level::Log)),
            ("pad", Command::Pad),
            ("noPad", Command::NoPad),
            (
                "setLevel:Error",
                Command::SetLevel {
                    level: Level::Error,
                    pattern: String::new(),
                },
            ),
            (
                "setLevel:Debug=test_app.rs",
                Command::SetLevel {
                    level: Level::Debug,
                    pattern: "test_app.rs".into(),
                },
            ),
        ];

        for (line, expected) in cases {
            assert_eq!(Command::parse(line), Ok(Some(expected)), "{line}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            Command::parse("\t  resetLevels :  Trace  "),
            Ok(Some(Command::ResetLevels(Level::Trace)))
        );
        assert_eq!(Command::parse(""), Ok(None));
    }

    #[test]
    fn unknown_and_malformed_lines_are_rejected() {
        assert_eq!(
            Command::parse("  frobnicate "),
            Err(UnknownCommand("frobnicate".into()))
        );
        assert!(Command::parse("addSink:").is_err());
        assert!(Command::parse("setLevel").is_err());
        assert!(Command::parse("pad: yes").is_err());
        assert_eq!(
            UnknownCommand("x".into()).to_string(),
            "Unknown command: x"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for line in [
            "clearSinks",
            "addSink:out.log",
            "resetLevels:Verbose",
            "setLevel:Info",
            "setLevel:Trace=-;net/",
        ] {
            let command = Command::parse(line).unwrap().unwrap();
            assert_eq!(command.to_string(), line);
        }
    }

    #[test]
    fn poll_reads_immediately_then_waits_for_interval() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "pad").expect("write settings");

        let mut state = SettingsFile::default();
        state.watch(file.path(), Duration::from_secs(60));

        let start = Instant::now();
        let first = state.poll(start);
        assert_eq!(first.announce.as_deref(), Some(file.path()));
        assert_eq!(first.contents.as_deref(), Some("pad"));

        write!(file, "\nnoPad").expect("update settings");
        assert_eq!(state.poll(start + Duration::from_secs(1)), Pending::default());

        let later = state.poll(start + Duration::from_secs(61));
        assert_eq!(later.announce, None);
        assert_eq!(later.contents.as_deref(), Some("pad\nnoPad"));
    }

    #[test]
    fn unchanged_contents_are_not_reapplied() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "noPad").expect("write settings");

        let mut state = SettingsFile::default();
        state.watch(file.path(), Duration::ZERO);
        let now = Instant::now();

        assert!(state.poll(now).contents.is_some());
        assert_eq!(state.poll(now), Pending::default());
    }

    #[test]
    fn missing_file_is_announced_but_not_applied() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent").join("settings.txt");

        let mut state = SettingsFile::default();
        state.watch(&path, Duration::ZERO);
        let pending = state.poll(Instant::now());

        assert_eq!(pending.announce, Some(path));
        assert_eq!(pending.contents, None);
    }

    #[test]
    fn empty_path_disables_watching() {
        let mut state = SettingsFile::default();
        state.watch(Path::new("settings.txt"), Duration::ZERO);
        state.watch(Path::new(""), Duration::ZERO);

        assert_eq!(state.path(), None);
        assert_eq!(state.poll(Instant::now()), Pending::default());
    }
}
