//! crates/logging/src/level.rs
//! Severity levels, ordered most urgent first.

use std::fmt;
use std::str::FromStr;

/// Severity of a log line.
///
/// Variants are ordered by urgency: `Fatal` is the most urgent and compares
/// lowest, `Trace` is the least urgent and compares highest. The ordinal is
/// the index used by [`LevelFilter`](crate::LevelFilter).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Level {
    /// Unrecoverable condition; the process terminates after the line is written.
    Fatal = 0,
    /// Unconditional informational output such as logger self-reports.
    Log = 1,
    /// Failures the program can continue past.
    Error = 2,
    /// Potentially harmful situations.
    Warning = 3,
    /// Coarse progress information.
    Info = 4,
    /// Detail useful while debugging.
    Debug = 5,
    /// More detail than `Debug`.
    Verbose = 6,
    /// Finest-grained tracing, including traced expression evaluations.
    Trace = 7,
}

impl Level {
    /// Number of levels.
    pub const COUNT: usize = 8;

    /// Every level, most urgent first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fatal,
        Self::Log,
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
        Self::Verbose,
        Self::Trace,
    ];

    /// Position of the level in [`Level::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Three-letter tag used by the default formatter.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Fatal => "FTL",
            Self::Log => "LOG",
            Self::Error => "ERR",
            Self::Warning => "WRN",
            Self::Info => "NFO",
            Self::Debug => "DBG",
            Self::Verbose => "VBS",
            Self::Trace => "TRC",
        }
    }

    /// Full name of the level as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fatal => "Fatal",
            Self::Log => "Log",
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Verbose => "Verbose",
            Self::Trace => "Trace",
        }
    }

    /// Parses a level name the way settings files spell it.
    ///
    /// Only the first character matters and case is ignored, so `w`, `warn`
    /// and `WARNING` all select [`Level::Warning`]. `Fatal` cannot be selected
    /// this way, and anything unrecognised selects [`Level::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Level;
    ///
    /// assert_eq!(Level::from_settings_name("debug"), Level::Debug);
    /// assert_eq!(Level::from_settings_name(" V"), Level::Verbose);
    /// assert_eq!(Level::from_settings_name("fatal"), Level::Error);
    /// assert_eq!(Level::from_settings_name(""), Level::Error);
    /// ```
    #[must_use]
    pub fn from_settings_name(name: &str) -> Self {
        match name.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('l') => Self::Log,
            Some('w') => Self::Warning,
            Some('i') => Self::Info,
            Some('d') => Self::Debug,
            Some('v') => Self::Verbose,
            Some('t') => Self::Trace,
            _ => Self::Error,
        }
    }

    /// Maps a counted verbosity (the number of `-v` flags) onto a level.
    ///
    /// Zero keeps the default `Error` baseline; each additional step enables
    /// the next less urgent level, saturating at `Trace`.
    #[must_use]
    pub const fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Self::Error,
            1 => Self::Warning,
            2 => Self::Info,
            3 => Self::Debug,
            4 => Self::Verbose,
            _ => Self::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when [`Level::from_str`] does not recognise a name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(trimmed.to_owned()))
    }
}
