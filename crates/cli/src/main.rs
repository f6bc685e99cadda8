// csvsh - interactive editor for CSV tables

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use csvsh_cli::crash::install_panic_hook;
use csvsh_cli::exit_codes::{EXIT_SUCCESS, EXIT_TERMINAL, EXIT_USAGE};
use csvsh_cli::host::TerminalSelector;
use csvsh_cli::prompt::Prompt;
use csvsh_cli::render::{OutputMode, Renderer};
use csvsh_cli::shell::Shell;
use csvsh_config::Settings;
use csvsh_engine::NoSelector;
use csvsh_io::{CsvLoader, Delimiter};

#[derive(Parser)]
#[command(name = "csvsh")]
#[command(about = "Load a CSV file and inspect or edit it with short commands")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  csvsh people.csv
  csvsh --delimiter ';' export.csv
  printf 'ls\\npeek column Age\\n' | csvsh people.csv --json

Set RUST_LOG=debug to see what the interpreter is doing.")]
struct Cli {
    /// CSV file or named file to load at startup
    file: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH", env = "CSVSH_CONFIG")]
    config: Option<PathBuf>,

    /// Field delimiter: one ASCII character, 'tab' or 'auto'
    #[arg(long, short = 'd', default_value = ",")]
    delimiter: String,

    /// Print every outcome as one JSON object per line
    #[arg(long)]
    json: bool,

    /// Treat duplicate column names as errors instead of using the first
    #[arg(long)]
    strict_columns: bool,
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("CSVSH_COMMIT"), ")",
        "\ntarget:  ", env!("CSVSH_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    install_panic_hook();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);
    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let delimiter = Delimiter::parse(&cli.delimiter)
        .map_err(|e| CliError::usage(e).with_hint("use e.g. --delimiter ';' or --delimiter tab"))?;

    if let Some(path) = &cli.config {
        if path.is_dir() {
            return Err(CliError::usage(format!("{} is a directory", path.display()))
                .with_hint("--config expects the path of a JSON settings file"));
        }
    }
    let (mut settings, settings_err) = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    if cli.strict_columns {
        settings.strict_columns = true;
    }

    let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
    let mode = if cli.json {
        OutputMode::Json
    } else if interactive {
        OutputMode::Color
    } else {
        OutputMode::Plain
    };
    log::debug!("interactive: {}, output: {:?}", interactive, mode);

    let scheme = settings.scheme();
    let bindings = settings.key_bindings();
    let renderer = Renderer::new(io::stdout(), mode, scheme.clone());
    let prompt_color = renderer.prompt_color();
    let mut shell = Shell::new(settings, CsvLoader::new(delimiter), renderer, interactive);

    if let Some(err) = &settings_err {
        shell.warn_settings(err).map_err(CliError::terminal)?;
    }
    if let Some(file) = &cli.file {
        shell
            .execute(&format!("load {}", file), &mut NoSelector)
            .map_err(CliError::terminal)?;
    }

    if interactive {
        let mut prompt = Prompt::new(bindings, prompt_color);
        let mut selector = TerminalSelector::new(scheme);
        shell.run_interactive(&mut prompt, &mut selector).map_err(CliError::terminal)
    } else {
        shell.run_lines(io::stdin().lock()).map_err(CliError::terminal)
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn terminal(err: io::Error) -> Self {
        Self { code: EXIT_TERMINAL, message: format!("terminal I/O failed: {}", err), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
