//! HTTP Payload Log Viewer - Entry Point

use clap::Parser;
use hplv::consent::{ConsentStore, MemoryConsentStore, PrefsFile};
use hplv::model::{AppError, PayloadViewError};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::{info, warn};

/// TUI for inspecting captured HTTP payloads from a capture session log
#[derive(Parser, Debug)]
#[command(name = "hplv")]
#[command(version)]
#[command(about = "TUI for inspecting captured HTTP payloads from a capture session log")]
pub struct Args {
    /// Path to the JSONL capture file
    pub file: PathBuf,

    /// Position of the transaction to inspect (0-based)
    #[arg(short, long, default_value = "0")]
    pub index: usize,

    /// Show the captured response instead of the request
    #[arg(short, long)]
    pub reply: bool,

    /// Directory exported payloads are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        // The record-not-found notice the host surfaces before closing.
        Err(AppError::View(PayloadViewError::RecordNotFound { index })) => {
            eprintln!("hplv: item not found (index {index})");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("hplv: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → config file → env vars → CLI args
    let config = {
        let config_file = hplv::config::load_config_with_precedence(args.config.clone())?;
        let merged = hplv::config::merge_config(config_file);
        let with_env = hplv::config::apply_env_overrides(merged);
        hplv::config::apply_cli_overrides(with_env, args.export_dir.clone())
    };

    if let Err(e) = hplv::logging::init(&config.log_file_path) {
        // Logging is best-effort; the viewer still works without it.
        eprintln!("hplv: logging disabled: {e}");
    }
    info!(?config, "configuration loaded and resolved");

    let log = hplv::source::load_capture(&args.file)?;

    // The persisted one-time payload notice acknowledgement. Falling back
    // to an in-memory store keeps the viewer usable when the prefs file is
    // unreadable; the notice then re-prompts next run.
    let store: Rc<RefCell<dyn ConsentStore>> = match PrefsFile::load_default() {
        Ok(prefs) => Rc::new(RefCell::new(prefs)),
        Err(e) => {
            warn!("preferences unavailable, consent will not persist: {e}");
            MemoryConsentStore::new().shared()
        }
    };

    let options = hplv::view::ViewOptions {
        index: args.index,
        show_reply: args.reply,
        export_dir: config.export_dir,
    };
    hplv::view::run(Some(&log), &options, store)
}
