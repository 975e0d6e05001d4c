use std::process::ExitCode;

use clap::Parser;
use trsync::cli::{Arguments, ExitStatus, logging};

fn main() -> ExitCode {
    let args = Arguments::parse();
    logging::init(args.verbose());

    match trsync::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
