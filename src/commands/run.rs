use crate::commands::{open_source, report_error};
use crate::watcher::FileWatcher;
use anyhow::{Context, Result};
use colored::*;
use crossbeam_channel::unbounded;
use simpl_core::Config;
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Events arriving this soon after a change belong to the same save
const SETTLE_TIME: Duration = Duration::from_millis(50);

/// `simpl run <PATH>`
pub fn run_file(path: &Path, config: Config) -> Result<()> {
    let stdout = io::stdout();
    run_file_to(path, config, &mut stdout.lock())
}

/// Parse the whole file, then execute it in a fresh environment
pub fn run_file_to<W: Write>(path: &Path, config: Config, out: &mut W) -> Result<()> {
    let source = open_source(path)?;
    debug!(path = %path.display(), ?config, "running program");
    simpl_core::run_with_config(source, out, config)?;
    Ok(())
}

/// `simpl run --watch <PATH>`: run now and again after every change
///
/// A failing run is reported and watching continues. Returns only if the
/// watcher shuts down.
pub fn watch(path: &Path, config: Config) -> Result<()> {
    let (tx, rx) = unbounded();
    let watcher = FileWatcher::new(path, tx)
        .with_context(|| format!("failed to watch {}", path.display()))?;

    info!(path = %watcher.target().display(), "watching for changes");
    if let Err(err) = run_file(path, config) {
        report_error(&err);
    }

    for msg in rx.iter() {
        match msg {
            Ok(_) => {
                thread::sleep(SETTLE_TIME);
                let merged = rx.try_iter().count();
                info!(path = %path.display(), merged, "file changed, re-running");

                eprintln!("{} {}", "Reloading".bright_yellow(), path.display());
                if let Err(err) = run_file(path, config) {
                    report_error(&err);
                }
            }
            Err(err) => eprintln!("{} watch error: {}", "error:".bright_red().bold(), err),
        }
    }

    Ok(())
}
