use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use clap::Parser;
use platen::TextSource;
use platen::normalize::normalize_with;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod history;
mod page;
mod source;
mod utils;

use app::App;
use config::Config;
use error::AppError;
use source::FileSource;

/// A typing trainer for your terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Text file to practice on
    #[arg(required_unless_present = "dump_config")]
    path: Option<PathBuf>,

    /// Directory to read `settings.toml` from and write logs and statistics to
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = Config::get(args.config)?;

    if args.dump_config {
        print!("{}", config.dump()?);
        return Ok(());
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = configure_logging(&config.data_dir, &config.settings.log_filter);
    install_panic_hook();

    let path = args.path.ok_or(AppError::MissingPath)?;
    let mut source = FileSource::new(path);
    let raw = source.load()?;
    let text = normalize_with(&raw, &config.settings.normalize());
    if text.is_empty() {
        return Err(AppError::EmptyText);
    }

    info!(
        path = %source.path().display(),
        config_dir = %config.config_dir.display(),
        raw_bytes = raw.len(),
        text_bytes = text.byte_len(),
        "starting session"
    );

    App::new(config, text, source)?.run()
}

/// Log to `typeline.log` in the data directory, since the terminal belongs to the UI
fn configure_logging(log_dir: &Path, default_filter: &str) -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(log_dir, "typeline.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}
