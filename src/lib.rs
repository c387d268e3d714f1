//! # simpl
//!
//! Command-line front end for the simpl language. The language itself lives
//! in `simpl-core`; this crate adds argument parsing, logging, colored
//! diagnostics and file watching.
//!
//! ## Modules
//!
//! - `cli`: argument definitions and logging setup.
//! - `commands`: the `tokens` and `run` subcommands.
//! - `watcher`: file change notifications for `run --watch`.

pub mod cli;
pub mod commands;
pub mod watcher;

pub use simpl_core::{Config, SubtractionMode};
