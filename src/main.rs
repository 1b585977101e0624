// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, ConversionMode};
use app_controller::Controller;
use providers::remote::RemoteTranscriber;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod rule_table;
mod storage;
mod subtitle_processor;
mod transliterate;

/// CLI wrapper for ConversionMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliConversionMode {
    Auto,
    Full,
}

impl From<CliConversionMode> for ConversionMode {
    fn from(cli_mode: CliConversionMode) -> Self {
        match cli_mode {
            CliConversionMode::Auto => ConversionMode::Auto,
            CliConversionMode::Full => ConversionMode::Full,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
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
    /// Convert legacy-font subtitle files to Unicode (default command)
    Convert(ConvertArgs),

    /// Transcribe a video through the speech-to-text service and convert the result
    Transcribe(TranscribeArgs),

    /// Generate shell completions for sinsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Conversion mode
    #[arg(short, long, value_enum)]
    mode: Option<CliConversionMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Input video file to transcribe
    #[arg(value_name = "VIDEO_PATH")]
    video_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Transcription service endpoint, overriding the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// sinsub - Sinhala legacy-font subtitle converter
///
/// Converts SRT subtitle files written in legacy visual-order Sinhala fonts
/// into proper Unicode, and can fetch fresh subtitles from a local
/// speech-to-text service.
#[derive(Parser, Debug)]
#[command(name = "sinsub")]
#[command(version = "0.3.0")]
#[command(about = "Sinhala legacy-font subtitle converter")]
#[command(long_about = "sinsub converts SRT subtitle files written in legacy visual-order
Sinhala fonts into proper Unicode.

EXAMPLES:
    sinsub movie.srt                        # Convert a single file
    sinsub -f movie.srt                     # Force overwrite existing output
    sinsub --mode full movie.srt            # Transliterate whole caption lines
    sinsub /subtitles/                      # Convert every .srt in a directory
    sinsub transcribe movie.mp4             # Transcribe a video and convert
    sinsub completions bash > sinsub.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Conversion mode
    #[arg(short, long, value_enum)]
    mode: Option<CliConversionMode>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "sinsub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        Some(Commands::Transcribe(args)) => run_transcribe(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                mode: cli.mode,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

/// Load configuration and reconcile the log level with CLI overrides
fn load_config(config_path: &str, cli_log_level: &Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = cli_log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::from_file(config_path)?;

    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Log level comes from the config file
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    if let Some(mode) = options.mode {
        config.conversion.mode = mode.into();
    }
    if options.force_overwrite {
        config.conversion.force_overwrite = true;
    }

    let force_overwrite = config.conversion.force_overwrite;
    let controller = Controller::with_config(config)?;
    controller
        .run_convert(options.input_path, force_overwrite)
        .await
}

async fn run_transcribe(options: TranscribeArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, &options.log_level)?;

    if let Some(endpoint) = options.endpoint {
        config.transcription.endpoint = endpoint;
    }

    let transcriber = RemoteTranscriber::new(&config.transcription);
    let cache = storage::open_with_fallback();
    let controller = Controller::with_config(config)?;

    controller
        .run_transcribe(
            &options.video_path,
            &transcriber,
            cache.as_ref(),
            options.force_overwrite,
        )
        .await
}
