use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folder_translate::config::{ConfigBuilder, DEFAULT_TARGET_LANG};
use folder_translate::lister::FsLister;
use folder_translate::renamer::FsRenamer;
use folder_translate::translator::{DeeplTranslator, Translator};
use folder_translate::tui::{run_tui, App};
use folder_translate::workflow::WorkflowController;

/// Translate the names of a folder's entries with DeepL, review, then rename.
#[derive(Parser, Debug)]
#[command(name = "folder-translate", version)]
struct Args {
    /// Folder whose immediate children are translated
    folder: Option<PathBuf>,

    /// DeepL API key
    #[arg(long, env = "DEEPL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Target language code, e.g. JA, EN-GB, DE
    #[arg(long, default_value = DEFAULT_TARGET_LANG)]
    target_lang: String,

    /// Override the DeepL endpoint (defaults by key type)
    #[arg(long)]
    endpoint: Option<String>,

    /// Translate only the file stem and keep the extension
    #[arg(long)]
    keep_extension: bool,

    /// Use translations verbatim instead of replacing illegal characters
    #[arg(long)]
    no_sanitize: bool,

    /// Leave entries starting with '.' out of the preview
    #[arg(long)]
    skip_hidden: bool,

    /// Leave symbolic links out of the preview
    #[arg(long)]
    skip_symlinks: bool,

    /// Where to write logs; the terminal is reserved for the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("folder-translate.log"));
    setup_file_logging(&log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let config = ConfigBuilder::new()
        .target_lang(args.target_lang.as_str())
        .endpoint(args.endpoint.clone())
        .keep_extension(args.keep_extension)
        .sanitize(!args.no_sanitize)
        .include_hidden(!args.skip_hidden)
        .include_symlinks(!args.skip_symlinks)
        .build()?;

    info!("Starting with {:?}", config);

    let translator = DeeplTranslator::new(config.endpoint.clone(), config.timeout)
        .context("Failed to build HTTP client")?;
    let lister = FsLister::new(config.listing);
    let workflow = WorkflowController::new(
        config,
        lister,
        Box::new(translator) as Box<dyn Translator>,
        FsRenamer,
    );

    let folder = args.folder.map(|p| p.to_string_lossy().into_owned());
    let app = App::with_inputs(workflow, folder, args.api_key);

    run_tui(app)
}

fn setup_file_logging(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folder_translate=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    info!("Logging to {}", log_file.display());
    Ok(())
}
