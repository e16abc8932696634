// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use subsel::app_config::{self, Config};
use subsel::script::{NotificationPrinter, ScriptRunner, parse_script};
use subsel::{
    DummySelectionController, GridSelectionController, LineId, SelectionController,
    SelectionListener, SubtitleCollection,
};

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
    /// Run a selection script against a synthetic document
    Run(RunArgs),

    /// Generate shell completions for subsel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Script file with one selection command per line
    #[arg(value_name = "SCRIPT")]
    script_path: PathBuf,

    /// Number of lines in the synthetic document
    #[arg(short = 'n', long, default_value_t = 10)]
    lines: usize,

    /// Use the do-nothing controller instead of the grid controller
    #[arg(short, long)]
    dummy: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subsel - Subtitle line selection tracking
///
/// Drives an active-line and selected-set session from a script and prints
/// every change notification.
#[derive(Parser, Debug)]
#[command(name = "subsel")]
#[command(version)]
#[command(about = "Scripted subtitle selection sessions")]
#[command(long_about = "subsel runs selection scripts against a subtitle document and prints the resulting notifications.

EXAMPLES:
    subsel run session.txt                  # 10 line document, grid controller
    subsel run -n 50 session.txt            # 50 line document
    subsel run --dummy session.txt          # Do-nothing controller
    subsel completions bash > subsel.bash   # Generate bash completions

SCRIPT COMMANDS:
    active <n>|none    select <list>|none    next    prev    show    reset")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
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
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything; the effective level is narrowed with set_max_level
    // once the config has been read.
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subsel", &mut std::io::stdout());
            Ok(())
        }
        Commands::Run(args) => run_script(args),
    }
}

fn run_script(options: RunArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.into());
    }

    let mut config = Config::load_or_create(&options.config_path)
        .context("Failed to load configuration")?;

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    log::set_max_level(config.log_level.into());

    let script = std::fs::read_to_string(&options.script_path)
        .with_context(|| format!("Failed to read script: {}", options.script_path.display()))?;
    let commands = parse_script(&script)?;

    let document = Rc::new(SubtitleCollection::from_texts(
        (1..=options.lines).map(|i| format!("Line {}", i)),
    )?);
    debug!("Document with {} lines:\n{}", document.len(), document);

    let controller: Box<dyn SelectionController<LineId>> = if options.dummy {
        info!("Using the do-nothing selection controller");
        Box::new(DummySelectionController::new())
    } else {
        Box::new(GridSelectionController::with_config(
            document.clone(),
            config.selection.clone(),
        ))
    };

    let out = Rc::new(RefCell::new(std::io::stdout()));
    let printer: Rc<dyn SelectionListener<LineId>> =
        Rc::new(NotificationPrinter::new(out.clone(), document.clone()));
    controller.add_selection_listener(&printer);

    let runner = ScriptRunner::new(
        controller.as_ref(),
        document,
        config.selection.initial_active_line,
        out,
    );
    runner.start_session();
    runner.run(&commands)?;

    controller.remove_selection_listener(&printer);
    info!("Ran {} script commands", commands.len());

    Ok(())
}
