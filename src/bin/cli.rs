//! Command-line front end writing lines through the global logger.
//!
//! Every operand is appended to one line. Without operands each line read
//! from standard input becomes its own log line.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand, value_parser};
use scribe::{
    DEFAULT_SETTINGS_INTERVAL, DefaultFormatter, FileSink, Level, Logger, ParseLevelError,
    SinkError, Spacing, callsite,
};

/// Failures that stop the binary before or while logging.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// `--level` names no level.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    /// `--file` could not be opened.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// Standard input could not be read.
    #[error("failed to read standard input: {0}")]
    Input(#[source] io::Error),
}

fn clap_command() -> ClapCommand {
    ClapCommand::new("scribe")
        .about("Write log lines through the scribe logging pipeline.")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .default_value("log")
                .help("Level of the emitted lines (fatal, log, error, warning, info, debug, verbose, trace)."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity; may be supplied multiple times.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Settings file to watch for logger commands."),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECONDS")
                .value_parser(value_parser!(u64))
                .help("Minimum seconds between settings file checks."),
        )
        .arg(
            Arg::new("gmt")
                .long("gmt")
                .help("Stamp lines in UTC instead of local time.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("as-is")
                .long("as-is")
                .help("Concatenate operands without separating spaces.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Append lines to PATH instead of standard error."),
        )
        .arg(
            Arg::new("message")
                .value_name("MESSAGE")
                .num_args(0..)
                .help("Values forming the line; read lines from standard input when absent."),
        )
}

/// Parses `arguments`, configures the global logger and writes the lines.
pub fn run_with<I, T>(
    arguments: I,
    stdin: &mut dyn BufRead,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match clap_command().try_get_matches_from(arguments) {
        Ok(matches) => matches,
        Err(error) => {
            let rendered = error.render().to_string();
            if error.use_stderr() {
                let _ = write!(stderr, "{rendered}");
            } else {
                let _ = write!(stdout, "{rendered}");
            }
            return ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(2));
        }
    };

    match run(&matches, Logger::global(), stdin) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "scribe: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &ArgMatches, logger: &Logger, stdin: &mut dyn BufRead) -> Result<(), CliError> {
    let level: Level = matches
        .get_one::<String>("level")
        .map_or(Ok(Level::Log), |name| name.parse())?;

    logger.set_verbosity(matches.get_count("verbose"));
    if matches.get_flag("gmt") {
        logger.set_formatter(DefaultFormatter::utc());
    }
    if matches.get_flag("as-is") {
        logger.set_spacing(Spacing::AsIs);
    }
    if let Some(path) = matches.get_one::<PathBuf>("file") {
        logger.add_sink(FileSink::open(path)?);
    }
    if let Some(path) = matches.get_one::<PathBuf>("settings") {
        let interval = matches
            .get_one::<u64>("interval")
            .map_or(DEFAULT_SETTINGS_INTERVAL, |seconds| Duration::from_secs(*seconds));
        logger.set_settings_file(path, interval);
        logger.check_settings();
    }

    let operands: Vec<&String> = matches
        .get_many::<String>("message")
        .map(Iterator::collect)
        .unwrap_or_default();

    if !operands.is_empty() {
        let mut handle = logger.handle(level, callsite!());
        for operand in operands {
            handle.append(operand);
        }
        handle.flush();
        return Ok(());
    }

    for line in stdin.lines() {
        let line = line.map_err(CliError::Input)?;
        logger.handle(level, callsite!()).append(line);
    }
    Ok(())
}
