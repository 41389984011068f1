//! ASMR Keyboard - tactile on-screen keyboard in the terminal
//!
//! Without a subcommand this runs the interactive keyboard. Subcommands
//! give headless, scriptable access to themes, layouts, layer transforms
//! and the backspace repeat schedule.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asmr_keyboard::cli::{CliError, CliResult, FrameArgs, LayoutArgs, RepeatArgs, ThemesArgs};
use asmr_keyboard::config::Config;
use asmr_keyboard::constants::{APP_DATA_DIR, APP_NAME, LOG_FILE_NAME};
use asmr_keyboard::sensor::SensorSource;
use asmr_keyboard::theme::ThemeId;
use asmr_keyboard::tui;

/// ASMR Keyboard - tactile on-screen keyboard with tilt parallax
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Starting theme, overriding the config file
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Orientation source, overriding the config file
    #[arg(long, value_enum)]
    sensor: Option<SensorSource>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the built-in themes in cycling order
    Themes(ThemesArgs),
    /// Compute one key's layer transforms for a tilt and press progress
    Frame(FrameArgs),
    /// Print a layout's key grid with proportional widths
    Layout(LayoutArgs),
    /// Print the fire timeline of a held Backspace
    Repeat(RepeatArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose { "debug" } else { "info" };

    let Some(command) = cli.command else {
        init_file_logging(filter)?;
        let config = load_config(cli.config.as_deref())
            .and_then(|config| apply_overrides(config, cli.theme.as_deref(), cli.sensor));
        return match config {
            Ok(config) => run_keyboard(config),
            Err(err) => exit_with(&err),
        };
    };

    init_stderr_logging(filter);
    let result = load_config(cli.config.as_deref())
        .and_then(|config| apply_overrides(config, cli.theme.as_deref(), cli.sensor))
        .and_then(|config| match command {
            Commands::Themes(args) => args.execute(),
            Commands::Frame(args) => args.execute(&config),
            Commands::Layout(args) => args.execute(),
            Commands::Repeat(args) => args.execute(&config),
        });

    if let Err(err) = result {
        exit_with(&err);
    }
    Ok(())
}

fn exit_with(err: &CliError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(err.exit_code().code());
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) if !path.exists() => Err(CliError::io(format!(
            "Config file not found: {}",
            path.display()
        ))),
        Some(path) => Config::load_from(path).map_err(|e| CliError::validation(format!("{e:#}"))),
        None => Config::load().map_err(|e| CliError::validation(format!("{e:#}"))),
    }
}

fn apply_overrides(
    mut config: Config,
    theme: Option<&str>,
    sensor: Option<SensorSource>,
) -> CliResult<Config> {
    if let Some(name) = theme {
        config.theme.initial = name
            .parse::<ThemeId>()
            .map_err(|e| CliError::validation(e.to_string()))?;
    }
    if let Some(source) = sensor {
        config.sensor.source = source;
    }
    Ok(config)
}

fn run_keyboard(config: Config) -> Result<()> {
    tracing::info!(
        theme = %config.theme.initial,
        sensor = %config.sensor.source,
        "Starting {}",
        APP_NAME
    );

    let mut terminal = tui::setup_terminal()?;
    let mut state = tui::AppState::new(config);

    // Run main TUI loop
    let result = tui::run_tui(&mut state, &mut terminal);

    // Restore terminal
    tui::restore_terminal(terminal)?;

    result
}

/// Headless commands log to stderr so stdout stays machine-readable.
fn init_stderr_logging(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// The terminal UI owns the screen, so its logs go to a file instead.
fn init_file_logging(filter: &str) -> Result<()> {
    let log_dir = dirs::cache_dir()
        .context("Failed to determine cache directory")?
        .join(APP_DATA_DIR);
    fs::create_dir_all(&log_dir).context(format!(
        "Failed to create log directory: {}",
        log_dir.display()
    ))?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&log_path)
        .context(format!("Failed to create log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
