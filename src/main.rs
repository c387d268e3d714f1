use clap::Parser;
use simpl::cli::{init_logging, Args};
use simpl::commands;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    args.color.apply();
    init_logging(args.verbose);

    match commands::dispatch(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err);
            ExitCode::FAILURE
        }
    }
}
