//! crates/logging/src/macros.rs
//! Statement-style logging macros.
//!
//! Every macro evaluates to a [`Handle`](crate::Handle); used as a statement,
//! the handle is dropped at the end of it and the line is written. Arguments
//! are appended in order and separated according to the logger's spacing.

/// Captures the current file, line and module path as a
/// [`Callsite`](crate::Callsite).
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::Callsite::new(::core::file!(), ::core::line!(), ::core::module_path!())
    };
}

/// Logs through an explicit [`Logger`](crate::Logger).
///
/// # Example
/// ```
/// use logging::{Level, Logger, MemorySink, log_to};
///
/// let logger = Logger::new();
/// let sink = MemorySink::new();
/// logger.add_sink(sink.clone());
///
/// log_to!(&logger, Level::Error, "disk", 3, "is full");
/// assert!(sink.contains("] disk 3 is full\n"));
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr $(, $value:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut handle = $crate::Handle::new($logger, $level, $crate::callsite!());
        $( handle.append($value); )*
        handle
    }};
}

/// Logs through an explicit logger when `condition` holds, recording the
/// condition's text in the line.
#[macro_export]
macro_rules! log_if_to {
    ($logger:expr, $level:expr, $condition:expr; $($value:expr),* $(,)?) => {{
        let enabled: bool = $condition;
        #[allow(unused_mut)]
        let mut handle = $crate::Handle::conditional(
            $logger,
            $level,
            $crate::callsite!().with_condition(::core::stringify!($condition)),
            enabled,
        );
        $( handle.append($value); )*
        handle
    }};
}

/// Logs at `level` through the global logger.
///
/// # Example
/// ```ignore
/// log_at!(Level::Info, "connected to", address);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr $(, $value:expr)* $(,)?) => {
        $crate::log_to!($crate::Logger::global(), $level $(, $value)*)
    };
}

/// Logs at `level` through the global logger when `condition` holds.
///
/// # Example
/// ```ignore
/// log_if!(Level::Warning, retries > 3; "giving up after", retries);
/// ```
#[macro_export]
macro_rules! log_if {
    ($level:expr, $condition:expr; $($value:expr),* $(,)?) => {
        $crate::log_if_to!($crate::Logger::global(), $level, $condition; $($value),*)
    };
}

/// Logs at [`Level::Fatal`](crate::Level::Fatal), then aborts the process.
///
/// # Example
/// ```ignore
/// log_fatal!("state file corrupt:", path.display().to_string());
/// ```
#[macro_export]
macro_rules! log_fatal {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Fatal $(, $value)*)
    };
}

/// Logs at [`Level::Log`](crate::Level::Log), shown under every default
/// configuration.
#[macro_export]
macro_rules! log_always {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Log $(, $value)*)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! log_error {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Error $(, $value)*)
    };
}

/// Logs at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! log_warning {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Warning $(, $value)*)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! log_info {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Info $(, $value)*)
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! log_debug {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Debug $(, $value)*)
    };
}

/// Logs at [`Level::Verbose`](crate::Level::Verbose).
#[macro_export]
macro_rules! log_verbose {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Verbose $(, $value)*)
    };
}

/// Logs at [`Level::Trace`](crate::Level::Trace).
#[macro_export]
macro_rules! log_trace {
    ($($value:expr),* $(,)?) => {
        $crate::log_at!($crate::Level::Trace $(, $value)*)
    };
}

/// Evaluates `expression`, logs `"<flow>: <expression> => <value>"` at
/// [`Level::Trace`](crate::Level::Trace) and yields the value.
///
/// # Example
/// ```
/// use logging::{Level, Logger, MemorySink, trace_eval_to};
///
/// let logger = Logger::new();
/// let sink = MemorySink::new();
/// logger.add_sink(sink.clone());
/// logger.reset_levels(Level::Trace);
///
/// let pending = 4;
/// if trace_eval_to!(&logger, "if", pending > 3) {
///     assert!(sink.contains("] if: pending > 3 => true\n"));
/// }
/// ```
#[macro_export]
macro_rules! trace_eval_to {
    ($logger:expr, $flow:expr, $expression:expr) => {
        $crate::Handle::new($logger, $crate::Level::Trace, $crate::callsite!()).log_expression(
            $flow,
            ::core::stringify!($expression),
            $expression,
        )
    };
}

/// [`trace_eval_to!`] through the global logger.
///
/// # Example
/// ```ignore
/// while trace_eval!("while", queue.len() > 0) { /* ... */ }
/// ```
#[macro_export]
macro_rules! trace_eval {
    ($flow:expr, $expression:expr) => {
        $crate::trace_eval_to!($crate::Logger::global(), $flow, $expression)
    };
}
