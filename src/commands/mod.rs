//! Subcommand handlers
//!
//! Each handler writes program output to stdout and returns an `anyhow`
//! error for `main` to report.

pub mod run;
pub mod tokens;

use crate::cli::Commands;
use anyhow::{Context, Result};
use colored::*;
use simpl_core::Config;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Execute a parsed subcommand
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Tokens { path } => tokens::print_tokens(&path),
        Commands::Run {
            path,
            watch,
            legacy_subtraction,
        } => {
            let mut config = Config::new();
            if legacy_subtraction {
                config = config.with_legacy_subtraction();
            }

            if watch {
                run::watch(&path, config)
            } else {
                run::run_file(&path, config)
            }
        }
    }
}

/// Print an error and its causes to stderr
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".bright_red().bold(), err);
}

pub(crate) fn open_source(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
