use std::process::ExitCode;

use chain_plot::cli::{error_message, run, Args};
use clap::Parser;
use tracing::debug;

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        debug!(?err, "run failed");
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "chain-plot".to_string());
        eprintln!("{}", error_message(&err, &program));
    }
    // Failures are reported on the console only; the exit status stays 0.
    ExitCode::SUCCESS
}
