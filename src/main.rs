// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use hidisub::app_config::{self, Config};
use hidisub::converter::{ConversionOptions, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for hidisub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// hidisub - styled cue track to ASS converter
///
/// Converts role-tagged cue tracks (and an optional player stylesheet)
/// into ASS subtitle documents written next to each input.
#[derive(Parser, Debug)]
#[command(name = "hidisub")]
#[command(version)]
#[command(about = "Convert styled cue tracks to ASS subtitles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "hidisub converts role-tagged cue tracks into ASS documents, keeping caption
positions, song and top-of-screen styles, and the stylesheet's italics, sizes,
fonts and colours.

EXAMPLES:
    hidisub episode.vtt                        # Write episode.ass next to the input
    hidisub -c episode.css episode.vtt         # Bake the stylesheet into the events
    hidisub -r episode.vtt                     # Remove the intro bumper offset
    hidisub --log-level debug /tracks/         # Convert every .vtt below a directory
    hidisub completions bash > hidisub.bash    # Generate bash completions

CONFIGURATION:
    Settings are read from hidisub.json by default. You can specify a different
    file with --config. If the file doesn't exist, built-in defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input tracks or directories to convert
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Stylesheet to apply (single input only)
    #[arg(short, long, value_name = "FILE")]
    css_file: Option<PathBuf>,

    /// Remove the intro bumper offset from every event
    #[arg(short, long)]
    remove_bumper: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Configuration file path
    #[arg(long, value_name = "FILE", default_value = "hidisub.json")]
    config: PathBuf,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger accepts everything; the max level does the filtering
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for log level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "hidisub", &mut std::io::stdout());
        return Ok(());
    }

    if cli.paths.is_empty() {
        let mut cmd = CommandLineOptions::command();
        eprintln!("{}", cmd.render_help());
        std::process::exit(1);
    }

    run_convert(cli)
}

fn run_convert(options: CommandLineOptions) -> Result<()> {
    // Command line level first, so config loading is already logged at it
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = Config::load_or_default(&options.config)?;
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }
    debug!("Using configuration: {:?}", config.conversion);

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let conversion_options = ConversionOptions {
        css_file: options.css_file,
        remove_bumper: options.remove_bumper,
    };
    let report = controller.run(&options.paths, &conversion_options)?;

    if !report.is_success() {
        return Err(anyhow!(
            "{} of {} file(s) failed to convert",
            report.failed.len(),
            report.failed.len() + report.converted.len()
        ));
    }

    Ok(())
}
