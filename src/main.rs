// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use subdialogs::app_config::{Config, LogLevel};
use subdialogs::dialogs::{Dialog, FileOutcome};
use subdialogs::file_utils::FileManager;
use subdialogs::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the dialog corpus of a subtitle directory and split it
    Build(BuildArgs),

    /// Generate shell completions for subdialogs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Subtitle directory (defaults to `subtitles_path` from the config)
    #[arg(value_name = "INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Frame rate used to convert frame numbers to seconds
    #[arg(long)]
    fps: Option<u32>,

    /// Largest gap in seconds between two cues of one dialog
    #[arg(long)]
    max_gap: Option<u32>,

    /// Seed of the train/test shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Write train.jsonl and test.jsonl into this directory
    #[arg(short, long, value_name = "OUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subdialogs - dialog corpora from subtitle archives
#[derive(Parser, Debug)]
#[command(name = "subdialogs")]
#[command(version)]
#[command(about = "Builds a train/test dialog corpus from MicroDVD subtitle folders")]
#[command(long_about = "subdialogs decodes a folder of frame-timed subtitles, strips formatting noise,
groups consecutive cues into dialogs by their timing and splits the dialogs
into reproducible training and testing sets.

EXAMPLES:
    subdialogs build ./napisy                      # Build with conf.json settings
    subdialogs build ./napisy --fps 24 --max-gap 3 # Override windowing
    subdialogs build ./napisy -o ./corpus          # Export train.jsonl / test.jsonl
    subdialogs completions bash > subdialogs.bash  # Generate bash completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation, filtered by `log::max_level`
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn colour_for_level(level: Level) -> &'static str {
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
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                Self::colour_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config or CLI says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subdialogs", &mut std::io::stdout());
            Ok(())
        }
        Commands::Build(args) => run_build(args).await,
    }
}

async fn run_build(options: BuildArgs) -> Result<()> {
    if let Some(level) = options.log_level {
        log::set_max_level(LogLevel::from(level).to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(fps) = options.fps {
        config.dialogs.fps = fps;
    }
    if let Some(max_gap) = options.max_gap {
        config.dialogs.max_gap_between_dialogs = max_gap;
    }
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
    if let Some(input_dir) = &options.input_dir {
        config.subtitles_path = input_dir.to_string_lossy().to_string();
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let input_dir = PathBuf::from(&config.subtitles_path);
    let controller = Controller::with_config(config)?;

    // Stop submitting files on Ctrl+C and keep what is already done
    let stop = controller.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.stop();
        }
    });

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::with_template("{spinner} {pos} files {msg}")
            .map_err(|e| anyhow!("Invalid progress template: {}", e))?,
    );
    progress.enable_steady_tick(Duration::from_millis(120));

    let (corpus, report) = controller
        .load_corpus(&input_dir, |outcome| {
            progress.inc(1);
            if let FileOutcome::Loaded(file) = outcome {
                progress.set_message(format!("{} dialogs", file.dialogs.len()));
            }
        })
        .await?;
    progress.finish_and_clear();

    if corpus.is_empty() {
        return Err(anyhow!("No dialogs found in {:?}", input_dir));
    }

    let sets = corpus.split(&controller.splitter());
    info!("{}", report);
    info!(
        "Training set: {} dialogs, testing set: {} dialogs",
        sets.training_set.len(),
        sets.testing_set.len()
    );

    if let Some(output_dir) = &options.output_dir {
        write_jsonl(&output_dir.join("train.jsonl"), &sets.training_set)?;
        write_jsonl(&output_dir.join("test.jsonl"), &sets.testing_set)?;
        info!("Wrote corpus to {:?}", output_dir);
    }

    Ok(())
}

// One JSON array of utterances per line
fn write_jsonl(path: &Path, dialogs: &[Dialog]) -> Result<()> {
    let mut content = String::new();
    for dialog in dialogs {
        content.push_str(&serde_json::to_string(dialog).context("Failed to serialize dialog")?);
        content.push('\n');
    }
    FileManager::write_to_file(path, &content)
}
