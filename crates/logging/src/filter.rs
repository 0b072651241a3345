//! crates/logging/src/filter.rs
//! Level/pattern registry deciding which lines reach the sinks.

use crate::Level;

/// Maps levels to source-file patterns.
///
/// Each level holds at most one pattern. A line at level `L` from `file` is
/// shown when some registered level at `L` or less urgent than `L` has a
/// pattern matching `file`; registering `Info` therefore also enables
/// `Warning`, `Error`, `Log` and `Fatal` for the files its pattern matches.
///
/// The default registry enables `Error` (and everything more urgent) for every
/// file.
///
/// # Examples
///
/// ```
/// use logging::{Level, LevelFilter};
///
/// let mut filter = LevelFilter::default();
/// assert!(filter.shown(Level::Error, "src/main.rs"));
/// assert!(!filter.shown(Level::Debug, "src/main.rs"));
///
/// // Exclude everything, then re-include the network module.
/// filter.set_level(Level::Debug, "-;src/net/");
/// assert!(filter.shown(Level::Debug, "src/net/socket.rs"));
/// assert!(!filter.shown(Level::Debug, "src/main.rs"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelFilter {
    patterns: [Option<String>; Level::COUNT],
}

impl LevelFilter {
    /// Creates a registry with no entries; nothing is shown.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Default::default(),
        }
    }

    /// Creates a registry holding the single entry `level -> ""`.
    #[must_use]
    pub fn with_level(level: Level) -> Self {
        let mut filter = Self::empty();
        filter.patterns[level.ordinal()] = Some(String::new());
        filter
    }

    /// Registers `pattern` for `level`, replacing its previous pattern.
    ///
    /// Every other level registered with an identical pattern is removed, so
    /// one pattern string is owned by exactly one level and repeated calls for
    /// the same pattern move it rather than accumulate. The removal spans all
    /// levels, so once a less urgent level takes over a pattern, changing that
    /// level's pattern afterwards does not restore the entry it displaced.
    pub fn set_level(&mut self, level: Level, pattern: &str) {
        for slot in &mut self.patterns {
            if slot.as_deref() == Some(pattern) {
                *slot = None;
            }
        }
        self.patterns[level.ordinal()] = Some(pattern.to_owned());
    }

    /// Clears every entry and registers `level -> ""`.
    pub fn reset_levels(&mut self, level: Level) {
        *self = Self::with_level(level);
    }

    /// Returns the pattern registered for `level`, if any.
    #[must_use]
    pub fn pattern(&self, level: Level) -> Option<&str> {
        self.patterns[level.ordinal()].as_deref()
    }

    /// Reports whether a line at `level` from `file` passes the registry.
    #[must_use]
    pub fn shown(&self, level: Level, file: &str) -> bool {
        self.patterns[level.ordinal()..]
            .iter()
            .flatten()
            .any(|pattern| file_matches(file, pattern))
    }

    /// Registered `(level, pattern)` pairs, most urgent first.
    #[must_use]
    pub fn entries(&self) -> Vec<(Level, &str)> {
        Level::ALL
            .into_iter()
            .filter_map(|level| self.pattern(level).map(|pattern| (level, pattern)))
            .collect()
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::with_level(Level::Error)
    }
}

/// Evaluates a semicolon-separated pattern against a file path.
///
/// Terms are substrings matched left to right. A matching plain term marks the
/// file included, a matching term prefixed with `-` marks it excluded, and the
/// last matching term wins. The state before any term is "included", so an
/// empty pattern, or a file no term mentions, passes. A lone `-` matches every
/// file, which makes `-;wanted/` the idiom for "only files under `wanted/`".
///
/// # Examples
///
/// ```
/// use logging::file_matches;
///
/// assert!(file_matches("src/x.rs", ""));
/// assert!(!file_matches("src/x.rs", "-"));
/// assert!(file_matches("src/x.rs", "src/;-src/include/"));
/// assert!(!file_matches("src/include/x.rs", "src/;-src/include/"));
/// assert!(file_matches("src/include/x.rs", "src/;-src/include/;.rs"));
/// ```
#[must_use]
pub fn file_matches(file: &str, pattern: &str) -> bool {
    let mut included = true;

    for term in pattern.split(';').map(str::trim) {
        let (exclude, needle) = match term.strip_prefix('-') {
            Some(rest) => (true, rest),
            None if term.is_empty() => continue,
            None => (false, term),
        };

        if file.contains(needle) {
            included = !exclude;
        }
    }

    included
}
