//! crates/logging/src/logger.rs
//! The logging context: sink registry, formatter, level registry and dispatch.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use logging_sink::{Sink, SinkError, StdErrSink};

use crate::settings::SettingsFile;
use crate::threads::ThreadRegistry;
use crate::{Callsite, DefaultFormatter, Formatter, Handle, Level, LevelFilter, Record, Spacing};

/// Shared logging configuration and the dispatch engine built on it.
///
/// A `Logger` owns the sink registry, the active [`Formatter`], the
/// [`LevelFilter`], the settings-file watcher and the thread registry. Each of
/// those lives behind its own lock, so reconfiguring one never blocks work on
/// another; only the fan-out of a formatted line to the sinks is serialized
/// across threads. Message accumulation in a [`Handle`] takes no lock at all.
///
/// Most programs use the process-wide instance returned by
/// [`Logger::global`], which the logging macros target. Independent instances
/// created with [`Logger::new`] are useful for libraries that want their own
/// routing and for tests.
///
/// # Examples
///
/// ```
/// use logging::{Level, Logger, MemorySink, callsite};
///
/// let logger = Logger::new();
/// let capture = MemorySink::new();
/// logger.add_sink(capture.clone());
/// logger.reset_levels(Level::Info);
///
/// logger.handle(Level::Info, callsite!()).append("listening on").append(8080);
/// logger.handle(Level::Debug, callsite!()).append("hidden");
///
/// assert!(capture.contains("listening on 8080"));
/// assert_eq!(capture.line_count(), 1);
/// ```
pub struct Logger {
    threads: ThreadRegistry,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
    formatter: Mutex<Box<dyn Formatter>>,
    levels: Mutex<LevelFilter>,
    settings: Mutex<SettingsFile>,
    pad: AtomicBool,
}

/// Why a sink was dropped from the registry.
enum DeliveryFailure {
    Error(SinkError),
    Panic(String),
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Logger {
    /// Creates an isolated logger with no sinks, the local-time
    /// [`DefaultFormatter`], padded spacing and the default `Error` baseline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            threads: ThreadRegistry::new(),
            sinks: Mutex::new(Vec::new()),
            formatter: Mutex::new(Box::new(DefaultFormatter::local())),
            levels: Mutex::new(LevelFilter::default()),
            settings: Mutex::new(SettingsFile::default()),
            pad: AtomicBool::new(Spacing::default().pads()),
        }
    }

    /// Returns the process-wide logger used by the logging macros.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Logger> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Starts a [`Handle`] for a line at `level` logged from `callsite`.
    pub fn handle(&self, level: Level, callsite: Callsite) -> Handle<'_> {
        Handle::new(self, level, callsite)
    }

    // ---------------------------------------------------------------------
    // Sink registry
    // ---------------------------------------------------------------------

    /// Appends `sink` to the registry; lines reach sinks in insertion order.
    pub fn add_sink<S>(&self, sink: S)
    where
        S: Sink + 'static,
    {
        self.add_boxed_sink(Box::new(sink));
    }

    /// Appends an already boxed sink to the registry.
    pub fn add_boxed_sink(&self, sink: Box<dyn Sink>) {
        lock(&self.sinks).push(sink);
    }

    /// Removes every sink. The next accepted line installs a standard-error
    /// sink so output is never silently lost.
    pub fn clear_sinks(&self) {
        lock(&self.sinks).clear();
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        lock(&self.sinks).len()
    }

    // ---------------------------------------------------------------------
    // Formatter
    // ---------------------------------------------------------------------

    /// Installs `formatter` and returns the one it replaces.
    pub fn set_formatter<F>(&self, formatter: F) -> Box<dyn Formatter>
    where
        F: Formatter + 'static,
    {
        std::mem::replace(&mut *lock(&self.formatter), Box::new(formatter))
    }

    /// Renders `error` with the active formatter.
    #[must_use]
    pub fn format_error(&self, error: &dyn Error) -> String {
        lock(&self.formatter).format_error(error)
    }

    // ---------------------------------------------------------------------
    // Level registry
    // ---------------------------------------------------------------------

    /// Registers `pattern` for `level`; see [`LevelFilter::set_level`].
    pub fn set_level(&self, level: Level, pattern: &str) {
        lock(&self.levels).set_level(level, pattern);
    }

    /// Replaces every level entry with `level -> ""`.
    pub fn reset_levels(&self, level: Level) {
        lock(&self.levels).reset_levels(level);
    }

    /// Sets the baseline from a counted verbosity; see [`Level::from_verbosity`].
    pub fn set_verbosity(&self, count: u8) {
        self.reset_levels(Level::from_verbosity(count));
    }

    /// Reports whether a line at `level` from `file` would be written.
    #[must_use]
    pub fn shown(&self, level: Level, file: &str) -> bool {
        lock(&self.levels).shown(level, file)
    }

    /// Snapshot of the registered `(level, pattern)` entries, most urgent first.
    #[must_use]
    pub fn level_entries(&self) -> Vec<(Level, String)> {
        lock(&self.levels)
            .entries()
            .into_iter()
            .map(|(level, pattern)| (level, pattern.to_owned()))
            .collect()
    }

    // ---------------------------------------------------------------------
    // Spacing
    // ---------------------------------------------------------------------

    /// Selects how values appended to handles are separated.
    pub fn set_spacing(&self, spacing: Spacing) {
        self.pad.store(spacing.pads(), Ordering::Relaxed);
    }

    /// Returns the current spacing mode.
    #[must_use]
    pub fn spacing(&self) -> Spacing {
        Spacing::from(self.pad.load(Ordering::Relaxed))
    }

    /// Index of the calling thread in this logger's thread registry.
    pub fn thread_index(&self) -> usize {
        self.threads.current()
    }

    // ---------------------------------------------------------------------
    // Settings file
    // ---------------------------------------------------------------------

    /// Watches `path` for settings commands, re-reading it at most once per
    /// `interval`. An empty path stops watching.
    ///
    /// The file is read at the next opportunity regardless of the interval.
    /// A newly watched path is announced with a `Log` line at that point, even
    /// if the file does not exist yet.
    pub fn set_settings_file(&self, path: impl AsRef<Path>, interval: Duration) {
        self.settings_state().watch(path.as_ref(), interval);
    }

    /// Re-reads the settings file when due and applies it if its contents
    /// changed since the last application.
    ///
    /// Called when a [`Handle`] is created and again at the start of every
    /// [`log_line`](Self::log_line); exposed so programs that log rarely can
    /// poll explicitly.
    pub fn check_settings(&self) {
        let pending = self.settings_state().poll(Instant::now());

        if let Some(path) = pending.announce {
            self.log_internal(
                Level::Log,
                &format!("Logger settings file: {}", path.display()),
            );
        }
        if let Some(contents) = pending.contents {
            self.apply_settings(&contents);
        }
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    /// Formats `message` once and delivers it to every sink.
    ///
    /// The settings file is refreshed first so configuration changes apply to
    /// this very line. Lines rejected by the level registry cost no formatting
    /// and no I/O; `Fatal` lines are never rejected. A sink that fails is
    /// removed, and once delivery finishes every surviving sink receives a
    /// `Logger[<sink type>]: <error>` line describing the failure.
    pub fn log_line(&self, record: &Record, message: &str) {
        self.check_settings();

        if record.level != Level::Fatal && !self.shown(record.level, record.callsite.file_or_empty())
        {
            return;
        }

        let thread = self.threads.current();
        let formatted = lock(&self.formatter).format(message, thread, record);
        let mut failures: Vec<(&'static str, DeliveryFailure)> = Vec::new();
        let mut sinks = lock(&self.sinks);

        if sinks.is_empty() {
            sinks.push(Box::new(StdErrSink::new()));
        }

        sinks.retain_mut(|sink| match deliver(sink.as_mut(), &formatted) {
            Ok(()) => true,
            Err(failure) => {
                failures.push((sink.type_name(), failure));
                false
            }
        });

        if sinks.is_empty() {
            sinks.push(Box::new(StdErrSink::new()));
        }

        for (sink_type, failure) in failures {
            let formatter = lock(&self.formatter);
            let reason = match failure {
                DeliveryFailure::Error(error) => formatter.format_error(&error),
                DeliveryFailure::Panic(message) => format!("panicked: {message}"),
            };
            let report = formatter.format(&format!("Logger[{sink_type}]: {reason}"), thread, record);
            drop(formatter);

            for sink in sinks.iter_mut() {
                // Failures while reporting a failure are dropped.
                let _ = deliver(sink.as_mut(), &report);
            }
        }
    }

    /// Logs a self-report line from inside the crate.
    pub(crate) fn log_internal(&self, level: Level, message: &str) {
        self.log_line(&Record::new(level, crate::callsite!()), message);
    }

    pub(crate) fn settings_state(&self) -> MutexGuard<'_, SettingsFile> {
        lock(&self.settings)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.sink_count())
            .field("levels", &*lock(&self.levels))
            .field("spacing", &self.spacing())
            .field("threads", &self.threads.len())
            .finish_non_exhaustive()
    }
}

fn deliver(sink: &mut dyn Sink, line: &str) -> Result<(), DeliveryFailure> {
    match panic::catch_unwind(AssertUnwindSafe(|| sink.log(line))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(error)) => Err(DeliveryFailure::Error(error)),
        Err(payload) => Err(DeliveryFailure::Panic(panic_message(payload.as_ref()))),
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned())
}
