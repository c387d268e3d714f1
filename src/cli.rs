use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "simpl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the simpl statement language", long_about = None)]
pub struct Args {
    /// When to color diagnostics
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the kind of every token in a source file, one per line
    Tokens {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Parse a source file and execute it
    Run {
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Re-run the program every time the file changes
        #[arg(short, long)]
        watch: bool,

        /// Evaluate `a - b` as `a + b`, like the first release of the language
        #[arg(long = "legacy-subtraction")]
        legacy_subtraction: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

impl ColorChoice {
    /// Apply the choice to `colored`'s global switch
    pub fn apply(self) {
        use std::io::IsTerminal;

        let enabled = match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        };
        colored::control::set_override(enabled);
    }
}

/// Log level for a `-v` count; warnings only by default
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr log subscriber
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(verbose))
        .with_target(false)
        .with_level(true)
        .init();
}
