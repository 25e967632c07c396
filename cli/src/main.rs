use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use noclist::{logging, run, Args, FAILURE_MESSAGE};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.log_format);
    debug!(base_url = %args.base_url, max_retries = args.max_retries, "starting");

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %err, "run failed");
            eprintln!("{FAILURE_MESSAGE}");
            ExitCode::FAILURE
        }
    }
}
